use super::*;
use crate::data::type_parser::parse_format;
use crate::recipe::pipeline::{DescriptorKind, DescriptorMapEntry, PipelineType};
use crate::recipe::shader::{ShaderFormat, ShaderType};

#[test]
fn names_are_unique_per_kind() {
    let mut script = Script::new();
    script
        .add_pipeline(Pipeline::new("p", PipelineType::Graphics))
        .unwrap();
    assert_eq!(
        script
            .add_pipeline(Pipeline::new("p", PipelineType::Compute))
            .unwrap_err()
            .to_string(),
        "duplicate pipeline name provided"
    );

    let id = script.add_buffer(Buffer::new("b")).unwrap();
    assert_eq!(script.buffer_id("b"), Some(id));
    assert_eq!(
        script.add_buffer(Buffer::new("b")).unwrap_err().to_string(),
        "duplicate buffer name provided"
    );

    script.add_shader(Shader::new("s", ShaderType::Vertex)).unwrap();
    assert!(script.add_shader(Shader::new("s", ShaderType::Fragment)).is_err());
    script.add_sampler(Sampler::new("smp")).unwrap();
    assert_eq!(
        script.add_sampler(Sampler::new("smp")).unwrap_err().to_string(),
        "duplicate sampler name provided"
    );

    script.add_blas(Blas::new("bl")).unwrap();
    assert!(script.add_blas(Blas::new("bl")).is_err());
    script.add_tlas(Tlas::new("tl")).unwrap();
    assert!(script.get_tlas("tl").is_some());
    assert!(script.get_pipeline("missing").is_none());
}

#[test]
fn types_and_formats_are_owned_by_the_script() {
    let mut script = Script::new();
    let fmt = parse_format("R32G32_SFLOAT").unwrap();
    let id = script.register_format(fmt.clone());
    assert_eq!(script.format(id), Some(&fmt));

    let ty = script.parse_type("R8G8B8A8_UNORM").unwrap();
    script.add_type("rgba", ty.clone()).unwrap();
    assert_eq!(
        script.add_type("rgba", ty.clone()).unwrap_err().to_string(),
        "duplicate type name provided"
    );
    assert_eq!(script.parse_type("rgba"), Some(ty));
    assert!(script.parse_type("nonsense").is_none());
}

#[test]
fn extensions_are_routed() {
    let mut script = Script::new();
    script.add_required_extension("VK_KHR_get_physical_device_properties2");
    script.add_required_extension("VK_KHR_storage_buffer_storage_class");
    script.add_required_feature("shaderInt64");

    assert_eq!(
        Recipe::required_instance_extensions(&script),
        vec!["VK_KHR_get_physical_device_properties2".to_owned()]
    );
    assert_eq!(
        Recipe::required_device_extensions(&script),
        vec!["VK_KHR_storage_buffer_storage_class".to_owned()]
    );
    assert_eq!(script.required_features(), ["shaderInt64".to_owned()]);
    assert!(script.is_known_feature("Storage16BitFeatures.storagePushConstant16"));
    assert!(!script.is_known_feature("madeUpFeature"));
}

#[test]
fn fence_timeout_defaults_and_overrides() {
    let mut script = Script::new();
    assert_eq!(script.fence_timeout_ms(), DEFAULT_FENCE_TIMEOUT_MS);
    Recipe::set_fence_timeout(&mut script, 250);
    assert_eq!(script.fence_timeout_ms(), 250);
}

#[test]
fn shader_infos_are_named_per_pipeline() {
    let mut script = Script::new();
    let vs = Shader::new("vs", ShaderType::Vertex).with_data(ShaderFormat::Glsl, "void main() {}");
    let vs_id = script.add_shader(vs.clone()).unwrap();
    script
        .add_shader(Shader::new("unused", ShaderType::Fragment))
        .unwrap();

    for name in ["a", "b"] {
        let mut p = Pipeline::new(name, PipelineType::Graphics);
        p.add_shader(vs_id, &vs, ShaderType::Vertex).unwrap();
        script.add_pipeline(p).unwrap();
    }

    let infos = script.shader_infos();
    let names: Vec<&str> = infos.iter().map(|i| i.name.as_str()).collect();
    assert_eq!(names, ["a-vs", "b-vs", "unused"]);
    assert_eq!(infos[0].source, "void main() {}");
    assert_eq!(infos[0].format, ShaderFormat::Glsl);
}

#[test]
fn opencl_generation_indexes_new_buffers() {
    let mut script = Script::new();
    let k = Shader::new("k", ShaderType::Compute).with_data(ShaderFormat::OpenClC, "kernel");
    let k_id = script.add_shader(k.clone()).unwrap();

    let mut p = Pipeline::new("p", PipelineType::Compute);
    p.add_shader(k_id, &k, ShaderType::Compute).unwrap();
    p.add_descriptor_entry(
        "k",
        "main",
        DescriptorMapEntry {
            arg_name: "n".to_owned(),
            kind: DescriptorKind::PodUbo,
            binding: 2,
            pod_arg_size: 4,
            ..Default::default()
        },
    )
    .unwrap();
    p.set_arg(crate::recipe::pipeline::ArgSetInfo {
        name: "n".to_owned(),
        ordinal: 0,
        format: parse_format("R32_UINT").unwrap(),
        value: crate::foundation::value::Value::from_int(9),
    });
    let pid = script.add_pipeline(p).unwrap();

    script.prepare_opencl_pipelines().unwrap();
    let id = script.buffer_id("p_pod_buffer_0_2").unwrap();
    assert_eq!(script.pipeline(pid).unwrap().get_buffer_for_binding(0, 2), Some(id));
    assert_eq!(script.buffer(id).unwrap().bytes(), &[9, 0, 0, 0]);

    let clone = script.clone_pipeline(pid, "q").unwrap();
    assert!(script.buffer_id("q_pod_buffer_0_2").is_some());
    assert_eq!(script.pipeline(clone).unwrap().name(), "q");
}

#[test]
fn split_borrow_reaches_pipeline_and_arenas() {
    let mut script = Script::new();
    let pid = script
        .add_pipeline(Pipeline::new("p", PipelineType::Graphics))
        .unwrap();
    let fb = script
        .add_buffer(Pipeline::generate_default_color_attachment_buffer().unwrap())
        .unwrap();

    let (pipeline, buffers, _) = script.pipeline_resources_mut(pid).unwrap();
    pipeline.add_color_attachment(buffers, fb, 0, 0).unwrap();
    assert_eq!(script.buffer(fb).unwrap().width, 250);
}
