//! Parser for the body of a `[test]` section.
//!
//! Commands are appended in source order. Pipeline state keywords edit a working copy of the
//! pipeline's [`PipelineData`]; draws snapshot that copy, and it is written back to the
//! pipeline once the whole section parsed. Every error is reported as `"<line>: <message>"`.

use crate::data::datum_type_parser::parse_datum_format;
use crate::data::format::{Format, Layout};
use crate::data::type_parser::parse_format;
use crate::foundation::error::{RecipeError, RecipeResult};
use crate::foundation::ids::{BufferId, PipelineId};
use crate::foundation::value::Value;
use crate::recipe::buffer::{Buffer, BufferType};
use crate::recipe::command::{
    BufferCommand, BufferCommandType, ClearColorCommand, ClearCommand, ClearDepthCommand,
    ClearStencilCommand, ColorFormat, Command, ComputeCommand, DrawArraysCommand, DrawRectCommand,
    EntryPointCommand, PatchParameterVerticesCommand, ProbeCommand, ProbeComparator,
    ProbeSsboCommand, Tolerance, Tolerances,
};
use crate::recipe::pipeline::{BufferInfo, Pipeline};
use crate::recipe::pipeline_data::{CullMode, PipelineData};
use crate::recipe::script::Script;
use crate::recipe::shader::ShaderType;
use crate::vkscript::names;
use crate::vkscript::tokenizer::{Token, Tokenizer};

fn fail<T>(msg: impl Into<String>) -> RecipeResult<T> {
    Err(RecipeError::validation(msg))
}

fn is_end(token: &Token) -> bool {
    token.is_eol() || token.is_eos()
}

fn shader_type_for_stage(stage: &str) -> ShaderType {
    match stage {
        "fragment" => ShaderType::Fragment,
        "compute" => ShaderType::Compute,
        "geometry" => ShaderType::Geometry,
        "tessellation evaluation" => ShaderType::TessellationEvaluation,
        "tessellation control" => ShaderType::TessellationControl,
        _ => ShaderType::Vertex,
    }
}

fn probe_comparator(text: &str) -> Option<ProbeComparator> {
    Some(match text {
        "==" => ProbeComparator::Equal,
        "!=" => ProbeComparator::NotEqual,
        "~=" => ProbeComparator::FuzzyEqual,
        "<" => ProbeComparator::Less,
        "<=" => ProbeComparator::LessOrEqual,
        ">" => ProbeComparator::Greater,
        ">=" => ProbeComparator::GreaterOrEqual,
        _ => return None,
    })
}

// Binding half of a `set:binding` pair, lexed as a separate `:N` word.
fn binding_suffix(token: &Token) -> Option<u64> {
    let text = token.as_str().strip_prefix(':')?;
    if text.is_empty() {
        return None;
    }
    let digits: String = text.chars().take_while(char::is_ascii_digit).collect();
    if digits.is_empty() {
        return Some(0);
    }
    Some(digits.parse().unwrap_or(u64::MAX))
}

/// Parses one test section against a pipeline of `script`.
#[derive(Debug)]
pub struct CommandParser<'a> {
    script: &'a mut Script,
    pipeline: PipelineId,
    tokenizer: Tokenizer,
    pipeline_data: PipelineData,
    commands: Vec<Command>,
    current_tolerances: Tolerances,
}

impl<'a> CommandParser<'a> {
    /// Parser over `data`, whose first line is line `current_line` of the script.
    pub fn new(
        script: &'a mut Script,
        pipeline: PipelineId,
        current_line: usize,
        data: impl Into<String>,
    ) -> Self {
        let pipeline_data = script
            .pipeline(pipeline)
            .map(|p| p.pipeline_data().clone())
            .unwrap_or_default();
        let mut tokenizer = Tokenizer::new(data);
        tokenizer.set_current_line(current_line);
        Self {
            script,
            pipeline,
            tokenizer,
            pipeline_data,
            commands: Vec::new(),
            current_tolerances: Tolerances::new(),
        }
    }

    /// Commands parsed so far.
    pub fn commands(&self) -> &[Command] {
        &self.commands
    }

    /// Take the parsed commands, leaving the parser empty.
    pub fn take_commands(&mut self) -> Vec<Command> {
        std::mem::take(&mut self.commands)
    }

    /// Working copy of the pipeline state.
    pub fn pipeline_data(&self) -> &PipelineData {
        &self.pipeline_data
    }

    /// Parse the whole section. Stops at the first error.
    #[tracing::instrument(skip_all, fields(pipeline = self.pipeline.0, line = self.tokenizer.current_line()))]
    pub fn parse(&mut self) -> RecipeResult<()> {
        loop {
            let token = self.tokenizer.next_token();
            if token.is_eos() {
                break;
            }
            if token.is_eol() {
                continue;
            }

            // Commands may read past their own line end, so errors take the starting line.
            let line = self.line();
            let before = self.commands.len();
            if let Err(err) = self.dispatch(token) {
                return Err(err.at_line(line));
            }
            if let Some(cmd) = self.commands.get(before) {
                tracing::trace!(command = cmd.name(), line = cmd.line(), "parsed command");
            }
        }

        let data = self.pipeline_data.clone();
        self.pipeline_mut()?.set_pipeline_data(data);
        Ok(())
    }

    fn dispatch(&mut self, token: Token) -> RecipeResult<()> {
        if !token.is_string() {
            return fail(format!(
                "Command not recognized. Received something other then a string: {}",
                token.to_original_string()
            ));
        }

        let name = token.as_str().to_owned();
        match name.as_str() {
            "draw" => {
                let token = self.tokenizer.next_token();
                if !token.is_string() {
                    return fail(format!(
                        "Invalid draw command in test: {}",
                        token.to_original_string()
                    ));
                }
                match token.as_str() {
                    "rect" => self.process_draw_rect(),
                    "arrays" => self.process_draw_arrays(),
                    other => fail(format!("Unknown draw command: {other}")),
                }
            }
            "clear" => self.process_clear(),
            "ssbo" => self.process_ssbo(),
            "uniform" => self.process_uniform(),
            "patch" => self.process_patch(),
            "probe" => self.process_probe(false),
            "tolerance" => self.process_tolerance(),
            "relative" => {
                let token = self.tokenizer.next_token();
                if token.as_str() != "probe" {
                    return fail(format!(
                        "relative must be used with probe: {}",
                        token.to_original_string()
                    ));
                }
                self.process_probe(true)
            }
            "compute" => self.process_compute(),
            "vertex" | "fragment" | "geometry" | "tessellation" => self.process_stage(&name),

            "primitiveRestartEnable" => {
                self.pipeline_data.enable_primitive_restart = self.boolean_value(&name)?;
                Ok(())
            }
            "depthClampEnable" => {
                self.pipeline_data.enable_depth_clamp = self.boolean_value(&name)?;
                Ok(())
            }
            "rasterizerDiscardEnable" => {
                self.pipeline_data.enable_rasterizer_discard = self.boolean_value(&name)?;
                Ok(())
            }
            "depthBiasEnable" => {
                self.pipeline_data.enable_depth_bias = self.boolean_value(&name)?;
                Ok(())
            }
            "logicOpEnable" => {
                self.pipeline_data.enable_logic_op = self.boolean_value(&name)?;
                Ok(())
            }
            "blendEnable" => {
                self.pipeline_data.enable_blend = self.boolean_value(&name)?;
                Ok(())
            }
            "depthTestEnable" => {
                self.pipeline_data.enable_depth_test = self.boolean_value(&name)?;
                Ok(())
            }
            "depthWriteEnable" => {
                self.pipeline_data.enable_depth_write = self.boolean_value(&name)?;
                Ok(())
            }
            "depthBoundsTestEnable" => {
                self.pipeline_data.enable_depth_bounds_test = self.boolean_value(&name)?;
                Ok(())
            }
            "stencilTestEnable" => {
                self.pipeline_data.enable_stencil_test = self.boolean_value(&name)?;
                Ok(())
            }

            "topology" => {
                self.pipeline_data.topology = self.state_value(&name, names::vk_topology)?;
                Ok(())
            }
            "polygonMode" => {
                self.pipeline_data.polygon_mode = self.state_value(&name, names::polygon_mode)?;
                Ok(())
            }
            "logicOp" => {
                self.pipeline_data.logic_op = self.state_value(&name, names::logic_op)?;
                Ok(())
            }
            "frontFace" => {
                self.pipeline_data.front_face = self.state_value(&name, names::front_face)?;
                Ok(())
            }
            "cullMode" => self.process_cull_mode(),

            "depthBiasConstantFactor" => {
                self.pipeline_data.depth_bias_constant_factor = self.float_value(&name)?;
                Ok(())
            }
            "depthBiasClamp" => {
                self.pipeline_data.depth_bias_clamp = self.float_value(&name)?;
                Ok(())
            }
            "depthBiasSlopeFactor" => {
                self.pipeline_data.depth_bias_slope_factor = self.float_value(&name)?;
                Ok(())
            }
            "lineWidth" => {
                self.pipeline_data.line_width = self.float_value(&name)?;
                Ok(())
            }
            "minDepthBounds" => {
                self.pipeline_data.min_depth_bounds = self.float_value(&name)?;
                Ok(())
            }
            "maxDepthBounds" => {
                self.pipeline_data.max_depth_bounds = self.float_value(&name)?;
                Ok(())
            }

            "srcColorBlendFactor" => {
                self.pipeline_data.src_color_blend_factor =
                    self.state_parameter(&name, "BlendFactor", names::vk_blend_factor)?;
                Ok(())
            }
            "dstColorBlendFactor" => {
                self.pipeline_data.dst_color_blend_factor =
                    self.state_parameter(&name, "BlendFactor", names::vk_blend_factor)?;
                Ok(())
            }
            "srcAlphaBlendFactor" => {
                self.pipeline_data.src_alpha_blend_factor =
                    self.state_parameter(&name, "BlendFactor", names::vk_blend_factor)?;
                Ok(())
            }
            "dstAlphaBlendFactor" => {
                self.pipeline_data.dst_alpha_blend_factor =
                    self.state_parameter(&name, "BlendFactor", names::vk_blend_factor)?;
                Ok(())
            }
            "colorBlendOp" => {
                self.pipeline_data.color_blend_op =
                    self.state_parameter(&name, "BlendOp", names::vk_blend_op)?;
                Ok(())
            }
            "alphaBlendOp" => {
                self.pipeline_data.alpha_blend_op =
                    self.state_parameter(&name, "BlendOp", names::vk_blend_op)?;
                Ok(())
            }
            "depthCompareOp" => {
                self.pipeline_data.depth_compare_op =
                    self.state_parameter(&name, "CompareOp", names::vk_compare_op)?;
                Ok(())
            }
            "front.compareOp" => {
                self.pipeline_data.front_compare_op =
                    self.state_parameter(&name, "CompareOp", names::vk_compare_op)?;
                Ok(())
            }
            "back.compareOp" => {
                self.pipeline_data.back_compare_op =
                    self.state_parameter(&name, "CompareOp", names::vk_compare_op)?;
                Ok(())
            }
            "front.failOp" => {
                self.pipeline_data.front_fail_op =
                    self.state_parameter(&name, "StencilOp", names::stencil_op)?;
                Ok(())
            }
            "front.passOp" => {
                self.pipeline_data.front_pass_op =
                    self.state_parameter(&name, "StencilOp", names::stencil_op)?;
                Ok(())
            }
            "front.depthFailOp" => {
                self.pipeline_data.front_depth_fail_op =
                    self.state_parameter(&name, "StencilOp", names::stencil_op)?;
                Ok(())
            }
            "back.failOp" => {
                self.pipeline_data.back_fail_op =
                    self.state_parameter(&name, "StencilOp", names::stencil_op)?;
                Ok(())
            }
            "back.passOp" => {
                self.pipeline_data.back_pass_op =
                    self.state_parameter(&name, "StencilOp", names::stencil_op)?;
                Ok(())
            }
            "back.depthFailOp" => {
                self.pipeline_data.back_depth_fail_op =
                    self.state_parameter(&name, "StencilOp", names::stencil_op)?;
                Ok(())
            }

            "front.compareMask" | "front.writeMask" | "back.compareMask" | "back.writeMask" => {
                fail(format!("{name} not implemented"))
            }

            "front.reference" => {
                self.pipeline_data.front_reference = self.reference_value(&name)?;
                Ok(())
            }
            "back.reference" => {
                self.pipeline_data.back_reference = self.reference_value(&name)?;
                Ok(())
            }
            "colorWriteMask" => self.process_color_write_mask(),

            _ => fail(format!("Unknown command: {name}")),
        }
    }

    fn pipeline(&self) -> RecipeResult<&Pipeline> {
        self.script
            .pipeline(self.pipeline)
            .ok_or_else(|| RecipeError::validation(format!("unknown pipeline id {}", self.pipeline.0)))
    }

    fn pipeline_mut(&mut self) -> RecipeResult<&mut Pipeline> {
        let id = self.pipeline;
        self.script
            .pipeline_mut(id)
            .ok_or_else(|| RecipeError::validation(format!("unknown pipeline id {}", id.0)))
    }

    fn buffer_mut(&mut self, id: BufferId) -> RecipeResult<&mut Buffer> {
        self.script
            .buffer_mut(id)
            .ok_or_else(|| RecipeError::validation(format!("unknown buffer id {}", id.0)))
    }

    fn line(&self) -> usize {
        self.tokenizer.current_line()
    }

    fn expect_end(&mut self, what: &str) -> RecipeResult<()> {
        let token = self.tokenizer.next_token();
        if !is_end(&token) {
            return fail(format!("{what}: {}", token.to_original_string()));
        }
        Ok(())
    }

    fn next_f32(&mut self) -> RecipeResult<f32> {
        let mut token = self.tokenizer.next_token();
        token.convert_to_double()?;
        Ok(token.as_f32())
    }

    // Next token, stepping over one optional comma.
    fn next_skipping_comma(&mut self) -> Token {
        let token = self.tokenizer.next_token();
        if token.is_comma() {
            return self.tokenizer.next_token();
        }
        token
    }

    fn new_auto_buffer(&mut self) -> RecipeResult<BufferId> {
        let name = format!("AutoBuf-{}", self.script.buffers().len());
        tracing::debug!(buffer = %name, "auto-creating buffer");
        self.script.add_buffer(Buffer::new(name))
    }

    // Buffer bound at `set`/`binding`, creating and binding one when the slot is empty.
    fn buffer_for_binding(
        &mut self,
        set: u32,
        binding: u32,
        buffer_type: BufferType,
    ) -> RecipeResult<BufferId> {
        if let Some(id) = self.pipeline()?.get_buffer_for_binding(set, binding) {
            return Ok(id);
        }
        let id = self.new_auto_buffer()?;
        let pipeline = self.pipeline_mut()?;
        pipeline.clear_buffers(set, binding);
        pipeline.add_buffer(BufferInfo::new(id, buffer_type).at(set, binding));
        Ok(id)
    }

    // Give the buffer `format` unless it already has a different, explicit one.
    fn reconcile_format(&mut self, buffer: BufferId, format: Format, mismatch: &str) -> RecipeResult<()> {
        let buf = self.buffer_mut(buffer)?;
        let matches = match buf.format() {
            Some(current) if !buf.format_is_default() => Some(current.equal(&format)),
            _ => None,
        };
        match matches {
            Some(true) => Ok(()),
            Some(false) => fail(mismatch),
            None => {
                buf.set_format(format.clone());
                self.script.register_type(format.ty().clone());
                self.script.register_format(format);
                Ok(())
            }
        }
    }

    fn parse_values(&mut self, command: &str, format: &Format) -> RecipeResult<Vec<Value>> {
        let is_float = format.is_float32() || format.is_float64();
        let mut values = Vec::new();
        let mut token = self.tokenizer.next_token();
        while !is_end(&token) {
            if is_float {
                if !token.is_integer() && !token.is_double() {
                    return fail(format!(
                        "Invalid value provided to {command} command: {}",
                        token.to_original_string()
                    ));
                }
                token.convert_to_double()?;
                values.push(Value::from_double(token.as_f64()));
            } else {
                if !token.is_integer() {
                    return fail(format!(
                        "Invalid value provided to {command} command: {}",
                        token.to_original_string()
                    ));
                }
                values.push(Value::from_int(token.as_u64()));
            }
            token = self.tokenizer.next_token();
        }

        let per_row = format.row_count().max(1) as usize;
        if values.is_empty() || values.len() % per_row != 0 {
            return fail(format!("Incorrect number of values provided to {command} command"));
        }
        Ok(values)
    }

    fn process_draw_rect(&mut self) -> RecipeResult<()> {
        let line = self.line();
        if self.pipeline()?.vertex_buffers().len() > 1 {
            return fail(
                "draw rect command is not supported in a pipeline with more than one vertex buffer attached",
            );
        }

        let mut is_ortho = false;
        let mut is_patch = false;
        let mut token = self.tokenizer.next_token();
        while token.is_string() {
            match token.as_str() {
                "ortho" => is_ortho = true,
                "patch" => is_patch = true,
                other => return fail(format!("Unknown parameter to draw rect: {other}")),
            }
            token = self.tokenizer.next_token();
        }

        token.convert_to_double()?;
        let x = token.as_f32();
        let y = self.next_f32()?;
        let width = self.next_f32()?;
        let height = self.next_f32()?;
        self.expect_end("Extra parameter to draw rect command")?;

        self.commands.push(Command::DrawRect(DrawRectCommand {
            line,
            pipeline: self.pipeline,
            timed: false,
            data: self.pipeline_data.clone(),
            is_ortho,
            is_patch,
            x,
            y,
            width,
            height,
        }));
        Ok(())
    }

    fn process_draw_arrays(&mut self) -> RecipeResult<()> {
        let line = self.line();
        let mut is_indexed = false;
        let mut is_instanced = false;
        let mut topology = None;

        let mut token = self.tokenizer.next_token();
        while token.is_string() {
            match token.as_str() {
                "indexed" => is_indexed = true,
                "instanced" => is_instanced = true,
                other => match names::topology(other) {
                    Some(topo) => {
                        topology = Some(topo);
                        token = self.tokenizer.next_token();
                        break;
                    }
                    None => return fail(format!("Unknown parameter to draw arrays: {other}")),
                },
            }
            token = self.tokenizer.next_token();
        }

        let Some(topology) = topology else {
            return fail("Missing draw arrays topology");
        };

        if !token.is_integer() {
            return fail(format!(
                "Missing integer first vertex value for draw arrays: {}",
                token.to_original_string()
            ));
        }
        let first_vertex_index = token.as_u32();

        let token = self.tokenizer.next_token();
        if !token.is_integer() {
            return fail(format!(
                "Missing integer vertex count value for draw arrays: {}",
                token.to_original_string()
            ));
        }
        let vertex_count = token.as_u32();

        let mut instance_count = 1;
        let mut token = self.tokenizer.next_token();
        if is_instanced && !is_end(&token) {
            if !token.is_integer() {
                return fail(format!(
                    "Invalid instance count for draw arrays: {}",
                    token.to_original_string()
                ));
            }
            instance_count = token.as_u32();
            token = self.tokenizer.next_token();
        }
        if !is_end(&token) {
            return fail(format!(
                "Extra parameter to draw arrays command: {}",
                token.to_original_string()
            ));
        }

        self.commands.push(Command::DrawArrays(DrawArraysCommand {
            line,
            pipeline: self.pipeline,
            timed: false,
            data: self.pipeline_data.clone(),
            is_indexed,
            is_instanced,
            topology,
            first_vertex_index,
            vertex_count,
            first_instance: 0,
            instance_count,
        }));
        Ok(())
    }

    fn process_compute(&mut self) -> RecipeResult<()> {
        let line = self.line();
        let token = self.tokenizer.next_token();
        if token.as_str() == "entrypoint" {
            return self.process_entry_point("compute");
        }

        let mut dims = [0u32; 3];
        let mut token = token;
        for (i, axis) in ["X", "Y", "Z"].into_iter().enumerate() {
            if i > 0 {
                token = self.tokenizer.next_token();
            }
            if !token.is_integer() {
                return fail(format!(
                    "Missing integer value for compute {axis} entry: {}",
                    token.to_original_string()
                ));
            }
            dims[i] = token.as_u32();
        }
        self.expect_end("Extra parameter to compute command")?;

        let [x, y, z] = dims;
        self.commands.push(Command::Compute(ComputeCommand {
            line,
            pipeline: self.pipeline,
            timed: false,
            x,
            y,
            z,
        }));
        Ok(())
    }

    fn process_clear(&mut self) -> RecipeResult<()> {
        let pipeline = self.pipeline;
        let mut token = self.tokenizer.next_token();
        if !token.is_string() {
            if !is_end(&token) {
                return fail(format!(
                    "Extra parameter to clear command: {}",
                    token.to_original_string()
                ));
            }
            self.commands.push(Command::Clear(ClearCommand {
                line: self.line(),
                pipeline,
                timed: false,
            }));
            return Ok(());
        }

        let line = self.line();
        let kind = token.as_str().to_owned();
        let cmd = match kind.as_str() {
            "depth" => Command::ClearDepth(ClearDepthCommand {
                line,
                pipeline,
                timed: false,
                value: self.next_f32()?,
            }),
            "stencil" => {
                token = self.tokenizer.next_token();
                if is_end(&token) {
                    return fail(format!(
                        "Missing stencil value for clear stencil command: {}",
                        token.to_original_string()
                    ));
                }
                if !token.is_integer() {
                    return fail(format!(
                        "Invalid stencil value for clear stencil command: {}",
                        token.to_original_string()
                    ));
                }
                Command::ClearStencil(ClearStencilCommand {
                    line,
                    pipeline,
                    timed: false,
                    value: token.as_u32(),
                })
            }
            "color" => {
                let r = self.next_f32()?;
                let g = self.next_f32()?;
                let b = self.next_f32()?;
                let a = self.next_f32()?;
                Command::ClearColor(ClearColorCommand {
                    line,
                    pipeline,
                    timed: false,
                    r,
                    g,
                    b,
                    a,
                })
            }
            _ => {
                return fail(format!(
                    "Extra parameter to clear command: {}",
                    token.to_original_string()
                ));
            }
        };

        self.expect_end(&format!("Extra parameter to clear {kind} command"))?;
        self.commands.push(cmd);
        Ok(())
    }

    // `N` or `N :M`, where the tokenizer has already split `N:M`.
    fn descriptor_slot(&mut self, first: u32, command: &str) -> RecipeResult<(u32, u32, Token)> {
        let token = self.tokenizer.next_token();
        if !token.as_str().starts_with(':') {
            return Ok((0, first, token));
        }
        match binding_suffix(&token) {
            Some(binding) => {
                let binding = u32::try_from(binding).map_err(|_| {
                    RecipeError::validation(format!(
                        "binding value too large in {command}: {}",
                        token.to_original_string()
                    ))
                })?;
                Ok((first, binding, self.tokenizer.next_token()))
            }
            None => fail(format!(
                "Invalid value for {command}: {}",
                token.to_original_string()
            )),
        }
    }

    fn process_ssbo(&mut self) -> RecipeResult<()> {
        let line = self.line();
        let token = self.tokenizer.next_token();
        if is_end(&token) {
            return fail("Missing binding and size values for ssbo command");
        }
        if !token.is_integer() {
            return fail("Invalid binding value for ssbo command");
        }

        let (set, binding, mut token) = self.descriptor_slot(token.as_u32(), "ssbo command")?;
        if token.is_string() && token.as_str() != "subdata" {
            return fail(format!(
                "Invalid value for ssbo command: {}",
                token.to_original_string()
            ));
        }

        let buffer = self.buffer_for_binding(set, binding, BufferType::Storage)?;
        let mut cmd = BufferCommand::new(line, self.pipeline, BufferCommandType::Ssbo, buffer);
        cmd.descriptor_set = set;
        cmd.binding = binding;

        if token.as_str() == "subdata" {
            cmd.is_subdata = true;

            token = self.tokenizer.next_token();
            if !token.is_string() {
                return fail(format!(
                    "Invalid type for ssbo command: {}",
                    token.to_original_string()
                ));
            }
            let format = parse_datum_format(token.as_str())?;
            self.reconcile_format(buffer, format, "probe ssbo format does not match buffer format")?;
            let format = self.buffer_format(buffer)?;

            token = self.tokenizer.next_token();
            if !token.is_integer() {
                return fail(format!(
                    "Invalid offset for ssbo command: {}",
                    token.to_original_string()
                ));
            }
            if token.as_i32() < 0 {
                return fail(format!(
                    "offset for SSBO must be positive, got: {}",
                    token.as_i32()
                ));
            }
            let size = format.size_in_bytes();
            if size == 0 || token.as_u32() % size != 0 {
                return fail(format!(
                    "offset for SSBO must be a multiple of the data size expected {size}"
                ));
            }
            cmd.offset = token.as_u32();

            let values = self.parse_values("ssbo", &format)?;
            self.buffer_mut(buffer)?
                .recalculate_max_size_in_bytes(&values, cmd.offset)?;
            cmd.values = values;
        } else {
            if is_end(&token) {
                return fail(format!(
                    "Missing size value for ssbo command: {}",
                    token.to_original_string()
                ));
            }
            if !token.is_integer() {
                return fail(format!(
                    "Invalid size value for ssbo command: {}",
                    token.to_original_string()
                ));
            }

            let buf = self.buffer_mut(buffer)?;
            buf.set_element_count(token.as_u32());
            if buf.format().is_none() {
                let format = parse_format("R8_SINT")
                    .ok_or_else(|| RecipeError::codec("Invalid format provided: R8_SINT"))?;
                buf.set_format(format.clone());
                // set_format clears the flag, so it is raised afterwards.
                buf.set_format_is_default(true);
                self.script.register_type(format.ty().clone());
                self.script.register_format(format);
            }

            self.expect_end("Extra parameter for ssbo command")?;
        }

        self.commands.push(Command::Buffer(cmd));
        Ok(())
    }

    fn buffer_format(&self, buffer: BufferId) -> RecipeResult<Format> {
        self.script
            .buffer(buffer)
            .and_then(Buffer::format)
            .cloned()
            .ok_or_else(|| RecipeError::validation("buffer has no format"))
    }

    fn process_uniform(&mut self) -> RecipeResult<()> {
        let line = self.line();
        let mut token = self.tokenizer.next_token();
        if is_end(&token) {
            return fail(format!(
                "Missing binding and size values for uniform command: {}",
                token.to_original_string()
            ));
        }
        if !token.is_string() {
            return fail(format!(
                "Invalid type value for uniform command: {}",
                token.to_original_string()
            ));
        }

        let is_ubo = token.as_str() == "ubo";
        let mut cmd = if is_ubo {
            token = self.tokenizer.next_token();
            if !token.is_integer() {
                return fail(format!(
                    "Invalid binding value for uniform ubo command: {}",
                    token.to_original_string()
                ));
            }
            let (set, binding, next) =
                self.descriptor_slot(token.as_u32(), "uniform ubo command")?;
            token = next;
            if !token.is_string() {
                return fail(format!(
                    "Invalid type value for uniform ubo command: {}",
                    token.to_original_string()
                ));
            }

            let buffer = self.buffer_for_binding(set, binding, BufferType::Uniform)?;
            let mut cmd =
                BufferCommand::new(line, self.pipeline, BufferCommandType::Uniform, buffer);
            cmd.descriptor_set = set;
            cmd.binding = binding;
            cmd
        } else {
            // Push constants have no descriptor slot, so a fresh buffer is always used.
            let buffer = self.new_auto_buffer()?;
            BufferCommand::new(line, self.pipeline, BufferCommandType::PushConstant, buffer)
        };

        let mut format = parse_datum_format(token.as_str())?;
        if is_ubo {
            format.set_layout(Layout::Std140);
        }
        self.reconcile_format(cmd.buffer, format, "probe ssbo format does not match buffer format")?;
        let format = self.buffer_format(cmd.buffer)?;

        token = self.tokenizer.next_token();
        if !token.is_integer() {
            return fail(format!(
                "Invalid offset value for uniform command: {}",
                token.to_original_string()
            ));
        }
        if token.as_i32() < 0 {
            return fail(format!(
                "offset for uniform must be positive, got: {}",
                token.as_i32()
            ));
        }
        let size = format.size_in_bytes();
        if size == 0 || token.as_u32() % size != 0 {
            return fail("offset for uniform must be multiple of data size");
        }
        cmd.offset = token.as_u32();

        let values = self.parse_values("uniform", &format)?;
        let buf = self.buffer_mut(cmd.buffer)?;
        buf.recalculate_max_size_in_bytes(&values, cmd.offset)?;
        if cmd.buffer_type == BufferCommandType::PushConstant {
            // Written at the command offset so consecutive pushes into one range compose.
            buf.set_data_with_offset(&values, cmd.offset)?;
        } else {
            cmd.values = values;
        }

        self.commands.push(Command::Buffer(cmd));
        Ok(())
    }

    fn process_tolerance(&mut self) -> RecipeResult<()> {
        self.current_tolerances.clear();

        let mut found = 0;
        let mut token = self.tokenizer.next_token();
        while !is_end(&token) && found < 4 {
            if token.is_comma() {
                token = self.tokenizer.next_token();
                continue;
            }
            if !token.is_integer() && !token.is_double() {
                return fail(format!(
                    "Invalid value for tolerance command: {}",
                    token.to_original_string()
                ));
            }

            token.convert_to_double()?;
            let value = token.as_f64();
            token = self.tokenizer.next_token();
            if token.is_string() {
                if token.as_str() != "%" {
                    return fail(format!(
                        "Invalid value for tolerance command: {}",
                        token.to_original_string()
                    ));
                }
                self.current_tolerances.push(Tolerance::percent(value));
                token = self.tokenizer.next_token();
            } else {
                self.current_tolerances.push(Tolerance::absolute(value));
            }
            found += 1;
        }

        if found == 0 {
            return fail("Missing value for tolerance command");
        }
        if found != 1 && found != 4 {
            return fail("Invalid number of tolerance parameters provided");
        }
        if !is_end(&token) {
            return fail(format!(
                "Extra parameter for tolerance command: {}",
                token.to_original_string()
            ));
        }
        Ok(())
    }

    fn process_patch(&mut self) -> RecipeResult<()> {
        let line = self.line();
        let token = self.tokenizer.next_token();
        if token.as_str() != "parameter" {
            return fail(format!(
                "Missing parameter flag to patch command: {}",
                token.to_original_string()
            ));
        }
        let token = self.tokenizer.next_token();
        if token.as_str() != "vertices" {
            return fail(format!(
                "Missing vertices flag to patch command: {}",
                token.to_original_string()
            ));
        }
        let token = self.tokenizer.next_token();
        if !token.is_integer() {
            return fail(format!(
                "Invalid count parameter for patch parameter vertices: {}",
                token.to_original_string()
            ));
        }
        let control_point_count = token.as_u32();
        self.expect_end("Extra parameter for patch parameter vertices command")?;

        self.pipeline_data.patch_control_points = control_point_count;
        self.commands
            .push(Command::PatchParameterVertices(PatchParameterVerticesCommand {
                line,
                pipeline: self.pipeline,
                timed: false,
                control_point_count,
            }));
        Ok(())
    }

    fn process_stage(&mut self, stage: &str) -> RecipeResult<()> {
        let mut shader_name = stage.to_owned();
        if stage == "tessellation" {
            let token = self.tokenizer.next_token();
            if !matches!(token.as_str(), "control" | "evaluation") {
                return fail(format!(
                    "Tessellation entrypoint must have <evaluation|control> in name: {}",
                    token.to_original_string()
                ));
            }
            shader_name = format!("{stage} {}", token.as_str());
        }

        let token = self.tokenizer.next_token();
        if token.as_str() != "entrypoint" {
            return fail(format!("Unknown command: {shader_name}"));
        }
        self.process_entry_point(&shader_name)
    }

    fn process_entry_point(&mut self, stage: &str) -> RecipeResult<()> {
        let line = self.line();
        let token = self.tokenizer.next_token();
        if is_end(&token) {
            return fail("Missing entrypoint name");
        }
        if !token.is_string() {
            return fail(format!(
                "Entrypoint name must be a string: {}",
                token.to_original_string()
            ));
        }
        let entry_point_name = token.as_str().to_owned();
        self.expect_end("Extra parameter for entrypoint command")?;

        self.commands.push(Command::EntryPoint(EntryPointCommand {
            line,
            pipeline: self.pipeline,
            timed: false,
            shader_type: shader_type_for_stage(stage),
            entry_point_name,
        }));
        Ok(())
    }

    fn process_probe(&mut self, relative: bool) -> RecipeResult<()> {
        let mut token = self.tokenizer.next_token();
        if !token.is_string() {
            return fail(format!(
                "Invalid token in probe command: {}",
                token.to_original_string()
            ));
        }
        if token.as_str() == "ssbo" {
            return self.process_probe_ssbo();
        }

        let Some(buffer) = self
            .pipeline()?
            .color_attachments()
            .first()
            .map(|info| info.buffer)
        else {
            return fail("Pipeline missing color buffers. Something went wrong.");
        };

        let mut cmd = ProbeCommand::new(self.line(), buffer);
        cmd.tolerances = self.current_tolerances.clone();
        cmd.is_relative = relative;

        match token.as_str() {
            "rect" => cmd.is_probe_rect = true,
            "all" => {
                cmd.is_whole_window = true;
                cmd.is_probe_rect = true;
            }
            _ => {}
        }
        if cmd.is_probe_rect {
            token = self.tokenizer.next_token();
            if !token.is_string() {
                return fail(format!(
                    "Invalid token in probe command: {}",
                    token.to_original_string()
                ));
            }
        }

        cmd.color_format = match token.as_str() {
            "rgba" => ColorFormat::Rgba,
            "rgb" => ColorFormat::Rgb,
            _ => {
                return fail(format!(
                    "Invalid format specified to probe command: {}",
                    token.to_original_string()
                ));
            }
        };

        token = self.tokenizer.next_token();
        if !cmd.is_whole_window {
            let open = token.is_open_bracket();
            if open {
                token = self.tokenizer.next_token();
            }
            token.convert_to_double()?;
            cmd.x = token.as_f32();

            token = self.next_skipping_comma();
            token.convert_to_double()?;
            cmd.y = token.as_f32();

            if cmd.is_probe_rect {
                token = self.next_skipping_comma();
                token.convert_to_double()?;
                cmd.width = token.as_f32();

                token = self.next_skipping_comma();
                token.convert_to_double()?;
                cmd.height = token.as_f32();
            }

            token = self.tokenizer.next_token();
            token = self.close_bracket(token, open)?;
        }

        let open = token.is_open_bracket();
        if open {
            token = self.tokenizer.next_token();
        }
        token.convert_to_double()?;
        cmd.r = token.as_f32();

        token = self.next_skipping_comma();
        token.convert_to_double()?;
        cmd.g = token.as_f32();

        token = self.next_skipping_comma();
        token.convert_to_double()?;
        cmd.b = token.as_f32();

        if cmd.is_rgba() {
            token = self.next_skipping_comma();
            token.convert_to_double()?;
            cmd.a = token.as_f32();
        }

        token = self.tokenizer.next_token();
        token = self.close_bracket(token, open)?;
        if !is_end(&token) {
            return fail(format!(
                "Extra parameter to probe command: {}",
                token.to_original_string()
            ));
        }

        self.commands.push(Command::Probe(cmd));
        Ok(())
    }

    // Match a closing bracket against an optional opening one; returns the token after it.
    fn close_bracket(&mut self, token: Token, open: bool) -> RecipeResult<Token> {
        if token.is_close_bracket() {
            if !open {
                return fail("Missing open bracket for probe command");
            }
            return Ok(self.tokenizer.next_token());
        }
        if open {
            return fail("Missing close bracket for probe command");
        }
        Ok(token)
    }

    fn process_probe_ssbo(&mut self) -> RecipeResult<()> {
        let line = self.line();
        let token = self.tokenizer.next_token();
        if is_end(&token) {
            return fail("Missing values for probe ssbo command");
        }
        if !token.is_string() {
            return fail(format!(
                "Invalid type for probe ssbo command: {}",
                token.to_original_string()
            ));
        }
        let format = parse_datum_format(token.as_str())?;

        let token = self.tokenizer.next_token();
        if !token.is_integer() {
            return fail(format!(
                "Invalid binding value for probe ssbo command: {}",
                token.to_original_string()
            ));
        }
        let (set, binding, mut token) =
            self.descriptor_slot(token.as_u32(), "probe ssbo command")?;
        if token.is_string() {
            return fail(format!(
                "Invalid value for probe ssbo command: {}",
                token.to_original_string()
            ));
        }

        let Some(buffer) = self.pipeline()?.get_buffer_for_binding(set, binding) else {
            return fail(format!(
                "unable to find buffer at descriptor set {set} and binding {binding}"
            ));
        };
        self.reconcile_format(buffer, format.clone(), "probe format does not match buffer format")?;
        let format_id = self.script.register_format(format.clone());

        if !token.is_integer() {
            return fail(format!(
                "Invalid offset for probe ssbo command: {}",
                token.to_original_string()
            ));
        }
        let offset = token.as_u32();

        token = self.tokenizer.next_token();
        if !token.is_string() {
            return fail(format!(
                "Invalid comparator for probe ssbo command: {}",
                token.to_original_string()
            ));
        }
        let Some(comparator) = probe_comparator(token.as_str()) else {
            return fail(format!("Invalid comparator: {}", token.as_str()));
        };

        let values = self.parse_values("probe ssbo", &format)?;
        self.commands.push(Command::ProbeSsbo(ProbeSsboCommand {
            line,
            buffer,
            tolerances: self.current_tolerances.clone(),
            comparator,
            descriptor_set: set,
            binding,
            offset,
            format: format_id,
            values,
        }));
        Ok(())
    }

    fn boolean_value(&mut self, command: &str) -> RecipeResult<bool> {
        let token = self.tokenizer.next_token();
        if is_end(&token) {
            return fail(format!("Missing value for {command} command"));
        }
        if !token.is_string() {
            return fail(format!(
                "Invalid value for {command} command: {}",
                token.to_original_string()
            ));
        }
        let Some(value) = names::parse_boolean(token.as_str()) else {
            return fail(format!(
                "Invalid value passed as a boolean string: {}",
                token.as_str()
            ));
        };
        self.expect_end(&format!("Extra parameter for {command} command"))?;
        Ok(value)
    }

    fn float_value(&mut self, command: &str) -> RecipeResult<f32> {
        let mut token = self.tokenizer.next_token();
        if is_end(&token) {
            return fail(format!("Missing value for {command} command"));
        }
        token.convert_to_double()?;
        self.expect_end(&format!("Extra parameter for {command} command"))?;
        Ok(token.as_f32())
    }

    fn reference_value(&mut self, command: &str) -> RecipeResult<u32> {
        let token = self.tokenizer.next_token();
        if is_end(&token) {
            return fail(format!("Missing parameter for {command} command"));
        }
        if !token.is_integer() {
            return fail(format!(
                "Invalid parameter for {command} command: {}",
                token.to_original_string()
            ));
        }
        self.expect_end(&format!("Extra parameter for {command} command"))?;
        Ok(token.as_u32())
    }

    // `topology`, `polygonMode`, `logicOp` and `frontFace`.
    fn state_value<T>(&mut self, command: &str, lookup: fn(&str) -> Option<T>) -> RecipeResult<T> {
        let token = self.tokenizer.next_token();
        if is_end(&token) {
            return fail(format!("Missing value for {command} command"));
        }
        if !token.is_string() {
            return fail(format!(
                "Invalid value for {command} command: {}",
                token.to_original_string()
            ));
        }
        let Some(value) = lookup(token.as_str()) else {
            return fail(format!(
                "Unknown value for {command} command: {}",
                token.to_original_string()
            ));
        };
        self.expect_end(&format!("Extra parameter for {command} command"))?;
        Ok(value)
    }

    // Blend factors and ops, compare ops and stencil ops.
    fn state_parameter<T>(
        &mut self,
        command: &str,
        kind: &str,
        lookup: fn(&str) -> Option<T>,
    ) -> RecipeResult<T> {
        let token = self.tokenizer.next_token();
        if is_end(&token) {
            return fail(format!("Missing parameter for {command} command"));
        }
        if !token.is_string() {
            return fail(format!(
                "Invalid parameter for {command} command: {}",
                token.to_original_string()
            ));
        }
        let Some(value) = lookup(token.as_str()) else {
            return fail(format!("Unknown {kind} provided: {}", token.as_str()));
        };
        self.expect_end(&format!("Extra parameter for {command} command"))?;
        Ok(value)
    }

    fn process_cull_mode(&mut self) -> RecipeResult<()> {
        let mut token = self.tokenizer.next_token();
        if is_end(&token) {
            return fail("Missing value for cullMode command");
        }
        if !token.is_string() {
            return fail(format!(
                "Invalid value for cullMode command: {}",
                token.to_original_string()
            ));
        }

        let mut mode = CullMode::None;
        while !is_end(&token) {
            // Every separator is read as `|`.
            if token.as_str() != "|" {
                let Some(bit) = names::cull_mode(token.as_str()) else {
                    return fail(format!(
                        "Unknown value for cullMode command: {}",
                        token.to_original_string()
                    ));
                };
                mode = mode.combine(bit);
            }
            token = self.tokenizer.next_token();
        }
        self.pipeline_data.cull_mode = mode;
        Ok(())
    }

    fn process_color_write_mask(&mut self) -> RecipeResult<()> {
        let mut token = self.tokenizer.next_token();
        if is_end(&token) {
            return fail("Missing parameter for colorWriteMask command");
        }
        if !token.is_string() {
            return fail(format!(
                "Invalid parameter for colorWriteMask command: {}",
                token.to_original_string()
            ));
        }

        let mut mask = 0u8;
        while !is_end(&token) {
            if token.as_str() != "|" {
                let Some(bit) = names::color_component(token.as_str()) else {
                    return fail(format!(
                        "Unknown parameter for colorWriteMask command: {}",
                        token.as_str()
                    ));
                };
                mask |= bit;
            }
            token = self.tokenizer.next_token();
        }
        self.pipeline_data.color_write_mask = mask;
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/vkscript/command_parser.rs"]
mod tests;
