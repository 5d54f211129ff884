use super::*;

#[test]
fn accessors_cover_pipeline_and_plain_commands() {
    let clear = Command::Clear(ClearCommand {
        line: 4,
        pipeline: PipelineId(1),
        timed: true,
    });
    assert_eq!(clear.line(), 4);
    assert_eq!(clear.pipeline(), Some(PipelineId(1)));
    assert!(clear.is_timed());
    assert_eq!(clear.name(), "ClearCommand");

    let copy = Command::Copy(CopyCommand {
        line: 9,
        buffer_from: BufferId(0),
        buffer_to: BufferId(1),
    });
    assert_eq!(copy.line(), 9);
    assert_eq!(copy.pipeline(), None);
    assert!(!copy.is_timed());
}

#[test]
fn probe_defaults_to_single_rgb_pixel() {
    let probe = ProbeCommand::new(2, BufferId(0));
    assert!(!probe.is_rgba());
    assert_eq!((probe.width, probe.height), (1.0, 1.0));
    assert!(probe.tolerances.is_empty());
}

#[test]
fn buffer_command_binds_whole_range() {
    let cmd = BufferCommand::new(1, PipelineId(0), BufferCommandType::Ssbo, BufferId(3));
    assert_eq!(cmd.descriptor_range, u64::MAX);
    assert!(!cmd.is_subdata);
}

#[test]
fn serializes_with_command_tag() {
    let cmd = Command::Compute(ComputeCommand {
        line: 1,
        pipeline: PipelineId(0),
        timed: false,
        x: 2,
        y: 3,
        z: 4,
    });
    let json = serde_json::to_value(&cmd).unwrap();
    assert_eq!(json["command"], "compute");
    assert_eq!(json["x"], 2);

    let mut probe = ProbeCommand::new(1, BufferId(0));
    probe.tolerances.push(Tolerance::percent(5.0));
    let json = serde_json::to_value(Command::Probe(probe)).unwrap();
    assert_eq!(json["tolerances"][0]["is_percent"], true);
}
