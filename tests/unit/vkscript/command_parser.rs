use super::*;
use crate::recipe::pipeline::PipelineType;
use crate::recipe::pipeline_data::{COLOR_MASK_B, COLOR_MASK_R, FrontFace, Topology};
use crate::recipe::shader::Shader;

fn graphics_script() -> (Script, PipelineId) {
    let mut script = Script::new();
    let id = script
        .add_pipeline(Pipeline::new("graphics", PipelineType::Graphics))
        .unwrap();
    let fb = script
        .add_buffer(Pipeline::generate_default_color_attachment_buffer().unwrap())
        .unwrap();
    let (pipeline, buffers, _) = script.pipeline_resources_mut(id).unwrap();
    pipeline.add_color_attachment(buffers, fb, 0, 0).unwrap();
    (script, id)
}

fn compute_script() -> (Script, PipelineId) {
    let mut script = Script::new();
    let id = script
        .add_pipeline(Pipeline::new("compute", PipelineType::Compute))
        .unwrap();
    (script, id)
}

fn parse(script: &mut Script, id: PipelineId, data: &str) -> RecipeResult<Vec<Command>> {
    let mut parser = CommandParser::new(script, id, 1, data);
    parser.parse()?;
    Ok(parser.take_commands())
}

fn parse_err(script: &mut Script, id: PipelineId, data: &str) -> String {
    parse(script, id, data).unwrap_err().to_string()
}

#[test]
fn draw_rect_snapshots_state() {
    let (mut script, id) = graphics_script();
    let cmds = parse(&mut script, id, "depthTestEnable true\ndraw rect ortho 2 4 10 20").unwrap();
    assert_eq!(cmds.len(), 1);
    let Command::DrawRect(rect) = &cmds[0] else {
        panic!("expected draw rect, got {}", cmds[0].name());
    };
    assert_eq!(rect.line, 2);
    assert!(rect.is_ortho);
    assert!(!rect.is_patch);
    assert_eq!((rect.x, rect.y, rect.width, rect.height), (2.0, 4.0, 10.0, 20.0));
    assert!(rect.data.enable_depth_test);

    assert_eq!(
        parse_err(&mut script, id, "draw rect 1 2 3 4 5"),
        "1: Extra parameter to draw rect command: 5"
    );
    assert_eq!(
        parse_err(&mut script, id, "draw rect sideways 1 2 3 4"),
        "1: Unknown parameter to draw rect: sideways"
    );
}

#[test]
fn draw_arrays() {
    let (mut script, id) = graphics_script();
    let cmds = parse(&mut script, id, "draw arrays instanced GL_LINES 2 6 3").unwrap();
    let Command::DrawArrays(draw) = &cmds[0] else {
        panic!("expected draw arrays");
    };
    assert_eq!(draw.topology, Topology::LineList);
    assert!(draw.is_instanced);
    assert!(!draw.is_indexed);
    assert_eq!(draw.first_vertex_index, 2);
    assert_eq!(draw.vertex_count, 6);
    assert_eq!(draw.instance_count, 3);

    let cmds = parse(&mut script, id, "draw arrays indexed TRIANGLE_LIST 0 3").unwrap();
    let Command::DrawArrays(draw) = &cmds[0] else {
        panic!("expected draw arrays");
    };
    assert!(draw.is_indexed);
    assert_eq!(draw.instance_count, 1);

    assert_eq!(
        parse_err(&mut script, id, "draw arrays 0 3"),
        "1: Missing draw arrays topology"
    );
    assert_eq!(
        parse_err(&mut script, id, "draw arrays GL_POINTS 0 3 4"),
        "1: Extra parameter to draw arrays command: 4"
    );
    assert_eq!(
        parse_err(&mut script, id, "draw arrays GL_POINTS 0 x"),
        "1: Missing integer vertex count value for draw arrays: x"
    );
}

#[test]
fn compute_dispatch() {
    let (mut script, id) = compute_script();
    let cmds = parse(&mut script, id, "compute 4 2 1").unwrap();
    assert_eq!(
        cmds[0],
        Command::Compute(ComputeCommand {
            line: 1,
            pipeline: id,
            timed: false,
            x: 4,
            y: 2,
            z: 1,
        })
    );
    assert_eq!(
        parse_err(&mut script, id, "compute 1 2"),
        "1: Missing integer value for compute Z entry: "
    );
    assert_eq!(
        parse_err(&mut script, id, "compute 1 2 3 4"),
        "1: Extra parameter to compute command: 4"
    );
}

#[test]
fn ssbo_subdata_creates_and_fills_buffer() {
    let (mut script, id) = compute_script();
    let cmds = parse(&mut script, id, "ssbo 0:1 subdata int 16 1 2").unwrap();
    let Command::Buffer(cmd) = &cmds[0] else {
        panic!("expected buffer command");
    };
    assert_eq!(cmd.buffer_type, BufferCommandType::Ssbo);
    assert!(cmd.is_subdata);
    assert_eq!((cmd.descriptor_set, cmd.binding, cmd.offset), (0, 1, 16));
    assert_eq!(cmd.values, vec![Value::from_int(1), Value::from_int(2)]);

    let bound = script.pipeline(id).unwrap().get_buffer_for_binding(0, 1);
    assert_eq!(bound, Some(cmd.buffer));
    let buf = script.buffer(cmd.buffer).unwrap();
    assert_eq!(buf.name(), "AutoBuf-0");
    assert_eq!(buf.max_size_in_bytes(), 24);
    assert!(buf.format().unwrap().is_int32());

    // Same slot reuses the buffer; a different type does not fit it.
    let again = parse(&mut script, id, "ssbo 1 subdata int 0 5").unwrap();
    let Command::Buffer(other) = &again[0] else {
        panic!("expected buffer command");
    };
    assert_eq!(other.binding, 1);
    assert_eq!(other.descriptor_set, 0);
    assert_eq!(
        parse_err(&mut script, id, "ssbo 0:1 subdata float 0 1.0"),
        "1: probe ssbo format does not match buffer format"
    );
}

#[test]
fn ssbo_size_gets_default_format() {
    let (mut script, id) = compute_script();
    let cmds = parse(&mut script, id, "ssbo 2 8").unwrap();
    let Command::Buffer(cmd) = &cmds[0] else {
        panic!("expected buffer command");
    };
    assert!(!cmd.is_subdata);
    let buf = script.buffer(cmd.buffer).unwrap();
    assert_eq!(buf.element_count(), 8);
    assert!(buf.format_is_default());

    // A typed write replaces the placeholder format.
    parse(&mut script, id, "ssbo 2 subdata vec4 0 1 2 3 4").unwrap();
    let buf = script.buffer(cmd.buffer).unwrap();
    assert!(!buf.format_is_default());
    assert!(buf.format().unwrap().is_float32());
}

#[test]
fn ssbo_errors() {
    let (mut script, id) = compute_script();
    assert_eq!(
        parse_err(&mut script, id, "ssbo"),
        "1: Missing binding and size values for ssbo command"
    );
    assert_eq!(
        parse_err(&mut script, id, "ssbo 0 subdata int 2 1"),
        "1: offset for SSBO must be a multiple of the data size expected 4"
    );
    assert_eq!(
        parse_err(&mut script, id, "ssbo 0 subdata int -4 1"),
        "1: offset for SSBO must be positive, got: -4"
    );
    assert_eq!(
        parse_err(&mut script, id, "ssbo 3 subdata vec2 0 1 2 3"),
        "1: Incorrect number of values provided to ssbo command"
    );
    assert_eq!(
        parse_err(&mut script, id, "ssbo 4 subdata int 0 1.5"),
        "1: Invalid value provided to ssbo command: 1.5"
    );
    assert_eq!(
        parse_err(&mut script, id, "ssbo 5 subdata blob 0 1"),
        "1: Invalid type provided: blob"
    );
}

#[test]
fn uniform_ubo_and_push_constant() {
    let (mut script, id) = compute_script();
    let cmds = parse(&mut script, id, "uniform ubo 1:2 vec4 0 1 2 3 4").unwrap();
    let Command::Buffer(ubo) = &cmds[0] else {
        panic!("expected buffer command");
    };
    assert_eq!(ubo.buffer_type, BufferCommandType::Uniform);
    assert_eq!((ubo.descriptor_set, ubo.binding), (1, 2));
    assert_eq!(ubo.values.len(), 4);
    let fmt = script.buffer(ubo.buffer).unwrap().format().unwrap();
    assert_eq!(fmt.layout(), Layout::Std140);

    let cmds = parse(&mut script, id, "uniform int 4 7").unwrap();
    let Command::Buffer(push) = &cmds[0] else {
        panic!("expected buffer command");
    };
    assert_eq!(push.buffer_type, BufferCommandType::PushConstant);
    assert!(push.values.is_empty());
    let buf = script.buffer(push.buffer).unwrap();
    assert_eq!(buf.bytes(), &[0, 0, 0, 0, 7, 0, 0, 0]);

    assert_eq!(
        parse_err(&mut script, id, "uniform int 3 1"),
        "1: offset for uniform must be multiple of data size"
    );
    assert_eq!(
        parse_err(&mut script, id, "uniform 3"),
        "1: Invalid type value for uniform command: 3"
    );
}

#[test]
fn tolerances_apply_to_later_probes() {
    let (mut script, id) = graphics_script();
    let cmds = parse(
        &mut script,
        id,
        "tolerance 2% 0.1 1 1\nprobe rgba (1, 2) (0.5, 0.5, 0.5, 1)",
    )
    .unwrap();
    let Command::Probe(probe) = &cmds[0] else {
        panic!("expected probe");
    };
    assert_eq!(probe.tolerances.len(), 4);
    assert_eq!(probe.tolerances[0], Tolerance::percent(2.0));
    assert_eq!(probe.tolerances[1], Tolerance::absolute(0.1));
    assert!(probe.is_rgba());
    assert_eq!((probe.x, probe.y), (1.0, 2.0));
    assert_eq!((probe.r, probe.a), (0.5, 1.0));
    assert_eq!(probe.line, 2);

    assert_eq!(
        parse_err(&mut script, id, "tolerance 1 2"),
        "1: Invalid number of tolerance parameters provided"
    );
    assert_eq!(
        parse_err(&mut script, id, "tolerance"),
        "1: Missing value for tolerance command"
    );
    assert_eq!(
        parse_err(&mut script, id, "tolerance 1 %%"),
        "1: Invalid value for tolerance command: %%"
    );
}

#[test]
fn probe_shapes() {
    let (mut script, id) = graphics_script();
    let cmds = parse(
        &mut script,
        id,
        "relative probe rect rgb 0.1 0.2 0.3 0.4 1 0 0\nprobe all rgba 0 0 1 1",
    )
    .unwrap();
    let Command::Probe(rect) = &cmds[0] else {
        panic!("expected probe");
    };
    assert!(rect.is_relative);
    assert!(rect.is_probe_rect);
    assert!(!rect.is_whole_window);
    assert_eq!((rect.width, rect.height), (0.3, 0.4));
    assert_eq!(rect.r, 1.0);

    let Command::Probe(all) = &cmds[1] else {
        panic!("expected probe");
    };
    assert!(all.is_whole_window);
    assert_eq!(all.b, 1.0);
    assert_eq!(all.a, 1.0);

    assert_eq!(
        parse_err(&mut script, id, "probe rgb (1 2 0 0 0"),
        "1: Missing close bracket for probe command"
    );
    assert_eq!(
        parse_err(&mut script, id, "probe rgb 1 2) 0 0 0"),
        "1: Missing open bracket for probe command"
    );
    assert_eq!(
        parse_err(&mut script, id, "probe xyz 1 2 0 0 0"),
        "1: Invalid format specified to probe command: xyz"
    );
    assert_eq!(
        parse_err(&mut script, id, "relative clear"),
        "1: relative must be used with probe: clear"
    );
}

#[test]
fn probe_needs_a_color_attachment() {
    let (mut script, id) = compute_script();
    assert_eq!(
        parse_err(&mut script, id, "probe rgb 0 0 1 1 1"),
        "1: Pipeline missing color buffers. Something went wrong."
    );
}

#[test]
fn probe_ssbo() {
    let (mut script, id) = compute_script();
    let cmds = parse(
        &mut script,
        id,
        "ssbo 0 subdata float 0 1.0 2.0\ntolerance 0.5\nprobe ssbo float 0 4 ~= 2.1",
    )
    .unwrap();
    let Command::ProbeSsbo(probe) = &cmds[1] else {
        panic!("expected probe ssbo");
    };
    assert_eq!(probe.line, 3);
    assert_eq!(probe.comparator, ProbeComparator::FuzzyEqual);
    assert_eq!(probe.offset, 4);
    assert_eq!(probe.values, vec![Value::from_double(2.1)]);
    assert_eq!(probe.tolerances.as_slice(), &[Tolerance::absolute(0.5)]);
    assert!(script.format(probe.format).unwrap().is_float32());

    assert_eq!(
        parse_err(&mut script, id, "probe ssbo float 0:7 0 == 1"),
        "1: unable to find buffer at descriptor set 0 and binding 7"
    );
    assert_eq!(
        parse_err(&mut script, id, "probe ssbo int 0 0 == 1"),
        "1: probe format does not match buffer format"
    );
    assert_eq!(
        parse_err(&mut script, id, "probe ssbo float 0 0 =~ 1"),
        "1: Invalid comparator: =~"
    );
}

#[test]
fn clear_variants() {
    let (mut script, id) = graphics_script();
    let cmds = parse(
        &mut script,
        id,
        "clear color 1 0.5 0 1\nclear depth 0.25\nclear stencil 3\nclear",
    )
    .unwrap();
    assert!(matches!(&cmds[0], Command::ClearColor(c) if c.g == 0.5 && c.a == 1.0));
    assert!(matches!(&cmds[1], Command::ClearDepth(c) if c.value == 0.25));
    assert!(matches!(&cmds[2], Command::ClearStencil(c) if c.value == 3));
    assert!(matches!(&cmds[3], Command::Clear(c) if c.line == 4));

    assert_eq!(
        parse_err(&mut script, id, "clear stencil 1.5"),
        "1: Invalid stencil value for clear stencil command: 1.5"
    );
    assert_eq!(
        parse_err(&mut script, id, "clear depth 1 2"),
        "1: Extra parameter to clear depth command: 2"
    );
    assert_eq!(
        parse_err(&mut script, id, "clear everything"),
        "1: Extra parameter to clear command: everything"
    );
}

#[test]
fn pipeline_state_is_written_back() {
    let (mut script, id) = graphics_script();
    parse(
        &mut script,
        id,
        "topology VK_PRIMITIVE_TOPOLOGY_LINE_LIST\n\
         depthWriteEnable true\n\
         colorWriteMask VK_COLOR_COMPONENT_R_BIT | VK_COLOR_COMPONENT_B_BIT\n\
         front.reference 10\n\
         cullMode VK_CULL_MODE_FRONT_BIT | VK_CULL_MODE_BACK_BIT\n\
         frontFace VK_FRONT_FACE_CLOCKWISE\n\
         lineWidth 2.5\n\
         srcColorBlendFactor VK_BLEND_FACTOR_SRC_ALPHA",
    )
    .unwrap();

    let data = script.pipeline(id).unwrap().pipeline_data();
    assert_eq!(data.topology, Topology::LineList);
    assert!(data.enable_depth_write);
    assert_eq!(data.color_write_mask, COLOR_MASK_R | COLOR_MASK_B);
    assert_eq!(data.front_reference, 10);
    assert_eq!(data.cull_mode, CullMode::FrontAndBack);
    assert_eq!(data.front_face, FrontFace::Clockwise);
    assert_eq!(data.line_width, 2.5);
    assert_eq!(
        data.src_color_blend_factor,
        crate::recipe::pipeline_data::BlendFactor::SrcAlpha
    );
}

#[test]
fn pipeline_state_errors() {
    let (mut script, id) = graphics_script();
    assert_eq!(
        parse_err(&mut script, id, "front.writeMask 3"),
        "1: front.writeMask not implemented"
    );
    assert_eq!(
        parse_err(&mut script, id, "blendEnable maybe"),
        "1: Invalid value passed as a boolean string: maybe"
    );
    assert_eq!(
        parse_err(&mut script, id, "polygonMode"),
        "1: Missing value for polygonMode command"
    );
    assert_eq!(
        parse_err(&mut script, id, "logicOp VK_LOGIC_OP_SOMETIMES"),
        "1: Unknown value for logicOp command: VK_LOGIC_OP_SOMETIMES"
    );
    assert_eq!(
        parse_err(&mut script, id, "colorBlendOp VK_BLEND_OP_MAYBE"),
        "1: Unknown BlendOp provided: VK_BLEND_OP_MAYBE"
    );
    assert_eq!(
        parse_err(&mut script, id, "colorWriteMask VK_COLOR_COMPONENT_X_BIT"),
        "1: Unknown parameter for colorWriteMask command: VK_COLOR_COMPONENT_X_BIT"
    );
    assert_eq!(
        parse_err(&mut script, id, "\n\nflibbertigibbet"),
        "3: Unknown command: flibbertigibbet"
    );
    assert_eq!(
        parse_err(&mut script, id, "42"),
        "1: Command not recognized. Received something other then a string: 42"
    );
}

#[test]
fn failed_parse_leaves_pipeline_state_alone() {
    let (mut script, id) = graphics_script();
    assert!(parse(&mut script, id, "depthTestEnable true\nbogus").is_err());
    assert!(!script.pipeline(id).unwrap().pipeline_data().enable_depth_test);
}

#[test]
fn entry_points_and_patches() {
    let (mut script, id) = graphics_script();
    let shader = Shader::new("vert", ShaderType::Vertex);
    let sid = script.add_shader(shader.clone()).unwrap();
    script
        .pipeline_mut(id)
        .unwrap()
        .add_shader(sid, &shader, ShaderType::Vertex)
        .unwrap();

    let cmds = parse(
        &mut script,
        id,
        "vertex entrypoint main2\ntessellation control entrypoint tc\npatch parameter vertices 4",
    )
    .unwrap();
    assert!(matches!(
        &cmds[0],
        Command::EntryPoint(e) if e.shader_type == ShaderType::Vertex && e.entry_point_name == "main2"
    ));
    assert!(matches!(
        &cmds[1],
        Command::EntryPoint(e) if e.shader_type == ShaderType::TessellationControl
    ));
    assert!(matches!(
        &cmds[2],
        Command::PatchParameterVertices(p) if p.control_point_count == 4
    ));

    let pipeline = script.pipeline(id).unwrap();
    assert_eq!(pipeline.shader("vert").unwrap().entry_point(), "main");
    assert_eq!(pipeline.pipeline_data().patch_control_points, 4);

    assert_eq!(
        parse_err(&mut script, id, "tessellation sideways entrypoint x"),
        "1: Tessellation entrypoint must have <evaluation|control> in name: sideways"
    );
    assert_eq!(
        parse_err(&mut script, id, "geometry main"),
        "1: Unknown command: geometry"
    );
    assert_eq!(
        parse_err(&mut script, id, "fragment entrypoint"),
        "1: Missing entrypoint name"
    );
    assert_eq!(
        parse_err(&mut script, id, "patch parameter vertices 3 4"),
        "1: Extra parameter for patch parameter vertices command: 4"
    );
}

#[test]
fn repeated_entry_points_for_one_stage() {
    let (mut script, id) = graphics_script();
    let shader = Shader::new("vert", ShaderType::Vertex);
    let sid = script.add_shader(shader.clone()).unwrap();
    script
        .pipeline_mut(id)
        .unwrap()
        .add_shader(sid, &shader, ShaderType::Vertex)
        .unwrap();

    let cmds = parse(&mut script, id, "vertex entrypoint a\nvertex entrypoint b\n").unwrap();
    let names: Vec<_> = cmds
        .iter()
        .map(|cmd| match cmd {
            Command::EntryPoint(e) => (e.shader_type, e.entry_point_name.as_str(), e.line),
            other => panic!("unexpected {}", other.name()),
        })
        .collect();
    assert_eq!(
        names,
        [(ShaderType::Vertex, "a", 1), (ShaderType::Vertex, "b", 2)]
    );

    // Parsing the same section again still succeeds.
    assert_eq!(parse(&mut script, id, "vertex entrypoint a").unwrap().len(), 1);
}

#[test]
fn compute_entrypoint() {
    let (mut script, id) = compute_script();
    let cmds = parse(&mut script, id, "compute entrypoint other").unwrap();
    assert!(matches!(
        &cmds[0],
        Command::EntryPoint(e) if e.shader_type == ShaderType::Compute && e.entry_point_name == "other"
    ));
}
