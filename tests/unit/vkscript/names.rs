use super::*;

#[test]
fn gl_and_vulkan_topology_spellings_agree() {
    assert_eq!(topology("GL_TRIANGLES"), Some(Topology::TriangleList));
    assert_eq!(topology("GL_TRIANGLES"), topology("TRIANGLE_LIST"));
    assert_eq!(topology("GL_PATCHES"), Some(Topology::PatchList));
    assert_eq!(
        topology("GL_LINE_STRIP_ADJACENCY"),
        Some(Topology::LineStripWithAdjacency)
    );
    assert_eq!(
        vk_topology("VK_PRIMITIVE_TOPOLOGY_TRIANGLE_LIST"),
        topology("TRIANGLE_LIST")
    );
    assert_eq!(topology(""), None);
    assert_eq!(topology("Invalid_Topology"), None);
    assert_eq!(topology("triangle_list"), None);
}

#[test]
fn every_topology_name_resolves() {
    for (name, value) in TOPOLOGIES.iter().chain(VK_TOPOLOGIES) {
        let found = topology(name).or_else(|| vk_topology(name));
        assert_eq!(found, Some(*value), "{name}");
    }
}

#[test]
fn vulkan_state_enumerants() {
    assert_eq!(polygon_mode("VK_POLYGON_MODE_LINE"), Some(PolygonMode::Line));
    assert_eq!(cull_mode("VK_CULL_MODE_BACK_BIT"), Some(CullMode::Back));
    assert_eq!(front_face("VK_FRONT_FACE_CLOCKWISE"), Some(FrontFace::Clockwise));
    assert_eq!(logic_op("VK_LOGIC_OP_NAND"), Some(LogicOp::Nand));
    assert_eq!(
        vk_blend_factor("VK_BLEND_FACTOR_ONE_MINUS_SRC1_ALPHA"),
        Some(BlendFactor::OneMinusSrc1Alpha)
    );
    assert_eq!(vk_blend_op("VK_BLEND_OP_INVERT_RGB_EXT"), Some(BlendOp::InvertRgb));
    assert_eq!(vk_compare_op("VK_COMPARE_OP_GREATER_OR_EQUAL"), Some(CompareOp::GreaterOrEqual));
    assert_eq!(stencil_op("VK_STENCIL_OP_DECREMENT_AND_WRAP"), Some(StencilOp::DecrementAndWrap));
    assert_eq!(color_component("VK_COLOR_COMPONENT_B_BIT"), Some(COLOR_MASK_B));
    assert_eq!(vk_blend_op("vk_blend_op_add"), None);
}

#[test]
fn short_names() {
    assert_eq!(blend_factor("src_alpha"), Some(BlendFactor::SrcAlpha));
    assert_eq!(blend_op("hsl_hue"), Some(BlendOp::HslHue));
    assert_eq!(compare_op("not_equal"), Some(CompareOp::NotEqual));
    assert_eq!(filter_type("linear"), Some(FilterType::Linear));
    assert_eq!(address_mode("mirror_clamp_to_edge"), Some(AddressMode::MirrorClampToEdge));
    assert_eq!(border_color("int_opaque_black"), Some(BorderColor::IntOpaqueBlack));
    assert_eq!(address_mode("REPEAT"), None);
}

#[test]
fn booleans_ignore_case() {
    assert_eq!(parse_boolean("TRUE"), Some(true));
    assert_eq!(parse_boolean("False"), Some(false));
    assert_eq!(parse_boolean("yes"), None);
}
