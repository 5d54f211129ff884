use super::*;

#[test]
fn defaults_describe_an_opaque_triangle_strip() {
    let data = PipelineData::default();
    assert_eq!(data.topology, Topology::TriangleStrip);
    assert_eq!(data.depth_compare_op, CompareOp::Always);
    assert_eq!(data.front_fail_op, StencilOp::Keep);
    assert_eq!(data.src_color_blend_factor, BlendFactor::One);
    assert_eq!(data.dst_alpha_blend_factor, BlendFactor::Zero);
    assert_eq!(data.color_write_mask, 0xf);
    assert_eq!(data.front_compare_mask, u32::MAX);
    assert_eq!(data.line_width, 1.0);
    assert_eq!(data.patch_control_points, 3);
    assert!(!data.enable_depth_write);
    assert!(data.viewport.is_none());
}

#[test]
fn cull_modes_combine_as_a_mask() {
    assert_eq!(CullMode::None.combine(CullMode::Front), CullMode::Front);
    assert_eq!(CullMode::Front.combine(CullMode::Back), CullMode::FrontAndBack);
    assert_eq!(CullMode::Back.combine(CullMode::Back), CullMode::Back);
    assert_eq!(
        CullMode::FrontAndBack.combine(CullMode::None),
        CullMode::FrontAndBack
    );
}
