use serde::Serialize;

use crate::data::bit_copy::{copy_memory_to_buffer, copy_value_to_buffer};
use crate::data::format::{Format, Segment};
use crate::data::small_float::hex_float_to_float;
use crate::data::types::{FormatMode, is_float16, is_float32, is_float64, is_uint8};
use crate::foundation::error::{RecipeError, RecipeResult};
use crate::foundation::ids::SamplerId;
use crate::foundation::value::Value;

/// How a buffer is bound to a pipeline.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
#[allow(missing_docs)]
pub enum BufferType {
    #[default]
    Unknown,
    Color,
    DepthStencil,
    Index,
    SampledImage,
    CombinedImageSampler,
    Storage,
    StorageDynamic,
    Uniform,
    UniformDynamic,
    PushConstant,
    Vertex,
    StorageImage,
    UniformTexelBuffer,
    StorageTexelBuffer,
    Resolve,
}

/// Step rate of a vertex buffer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
#[allow(missing_docs)]
pub enum InputRate {
    #[default]
    Vertex,
    Instance,
}

/// Named block of device memory described by a [`Format`].
///
/// An *element* is one instance of the format. It reads `input_needed_per_element` values
/// from the script and occupies `format.size_in_bytes()` bytes, which can be more than the
/// values need once padding is added.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Buffer {
    name: String,
    buffer_type: BufferType,
    format: Option<Format>,
    format_is_default: bool,
    element_count: u32,
    max_size_in_bytes: u32,
    sampler: Option<SamplerId>,
    #[serde(skip)]
    bytes: Vec<u8>,
    /// Image width in texels.
    pub width: u32,
    /// Image height in texels.
    pub height: u32,
    /// Image depth in texels.
    pub depth: u32,
    /// Mip chain length.
    pub mip_levels: u32,
    /// Samples per texel.
    pub samples: u32,
}

impl Default for Buffer {
    fn default() -> Self {
        Self {
            name: String::new(),
            buffer_type: BufferType::Unknown,
            format: None,
            format_is_default: false,
            element_count: 0,
            max_size_in_bytes: 0,
            sampler: None,
            bytes: Vec::new(),
            width: 1,
            height: 1,
            depth: 1,
            mip_levels: 1,
            samples: 1,
        }
    }
}

impl Buffer {
    /// Empty buffer called `name`.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Empty buffer called `name` laid out as `format`.
    pub fn with_format(name: impl Into<String>, format: Format) -> Self {
        let mut buf = Self::new(name);
        buf.set_format(format);
        buf
    }

    /// Unique name within the script.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Rename the buffer.
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Declared usage.
    pub fn buffer_type(&self) -> BufferType {
        self.buffer_type
    }

    /// Record the declared usage.
    pub fn set_buffer_type(&mut self, buffer_type: BufferType) {
        self.buffer_type = buffer_type;
    }

    /// Element layout, if one was given.
    pub fn format(&self) -> Option<&Format> {
        self.format.as_ref()
    }

    /// Replace the layout. An explicit format is never a default one.
    pub fn set_format(&mut self, format: Format) {
        self.format_is_default = false;
        self.format = Some(format);
    }

    /// True when the format was picked by the parser and later commands may replace it.
    pub fn format_is_default(&self) -> bool {
        self.format_is_default
    }

    /// Mark the current format as replaceable.
    pub fn set_format_is_default(&mut self, value: bool) {
        self.format_is_default = value;
    }

    /// Sampler attached to a combined image sampler.
    pub fn sampler(&self) -> Option<SamplerId> {
        self.sampler
    }

    /// Attach a sampler.
    pub fn set_sampler(&mut self, sampler: Option<SamplerId>) {
        self.sampler = sampler;
    }

    /// Elements held.
    pub fn element_count(&self) -> u32 {
        self.element_count
    }

    /// Change the element count without touching the backing bytes.
    pub fn set_element_count(&mut self, count: u32) {
        self.element_count = count;
    }

    /// Script values the buffer holds; packed formats count one value per element.
    pub fn value_count(&self) -> u32 {
        match &self.format {
            None => 0,
            Some(f) if f.is_packed() => self.element_count,
            Some(f) => self.element_count * f.input_needed_per_element(),
        }
    }

    /// Size the buffer to hold `count` script values.
    pub fn set_value_count(&mut self, count: u32) -> RecipeResult<()> {
        self.element_count = match &self.format {
            None => 0,
            Some(f) if f.is_packed() => count,
            Some(f) => count / self.element_shape(f)?.1,
        };
        Ok(())
    }

    /// Bytes the elements occupy, padding included.
    pub fn size_in_bytes(&self) -> u32 {
        self.format
            .as_ref()
            .map_or(0, |f| self.element_count * f.size_in_bytes())
    }

    /// Bytes from one element to the next.
    pub fn element_stride(&self) -> u32 {
        self.format.as_ref().map_or(0, Format::size_in_bytes)
    }

    /// Bytes from one image row to the next.
    pub fn row_stride(&self) -> u32 {
        self.element_stride() * self.width
    }

    /// Raw contents.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Raw contents for in-place writes.
    pub fn bytes_mut(&mut self) -> &mut [u8] {
        &mut self.bytes
    }

    fn require_format(&self) -> RecipeResult<&Format> {
        self.format.as_ref().ok_or_else(|| {
            RecipeError::validation(format!("buffer {} requires a format", self.name))
        })
    }

    // Bytes and input values of one element.
    fn element_shape(&self, format: &Format) -> RecipeResult<(u32, u32)> {
        let (size, inputs) = (format.size_in_bytes(), format.input_needed_per_element());
        if size == 0 || inputs == 0 {
            return Err(RecipeError::validation(format!(
                "buffer {} format has no components",
                self.name
            )));
        }
        Ok((size, inputs))
    }

    // Values needed to reach the end of `data` written at `offset`.
    fn value_count_for(&self, format: &Format, data: &[Value], offset: u32) -> RecipeResult<u32> {
        let (size, inputs) = self.element_shape(format)?;
        Ok((offset / size) * inputs + data.len() as u32)
    }

    /// Replace the contents from the start of the buffer.
    pub fn set_data(&mut self, data: &[Value]) -> RecipeResult<()> {
        self.set_data_with_offset(data, 0)
    }

    /// Write `data` starting `offset` bytes in.
    ///
    /// The buffer grows to fit but never shrinks. Values are encoded per component, so an
    /// integer written into a float component is converted first.
    pub fn set_data_with_offset(&mut self, data: &[Value], offset: u32) -> RecipeResult<()> {
        let format = self.require_format()?.clone();
        let (size, inputs) = self.element_shape(&format)?;
        let value_count = self.value_count_for(&format, data, offset)?;
        if value_count > self.value_count() {
            self.set_value_count(value_count)?;
        }
        self.bytes.resize(self.size_in_bytes() as usize, 0);

        let new_space = (data.len() as u32 / inputs) * size;
        let start = offset as usize;
        let end = (start + new_space as usize).min(self.bytes.len());
        if start < end {
            self.bytes[start..end].fill(0);
        }

        if data.len() as u32 > self.element_count * format.input_needed_per_element() {
            return Err(RecipeError::validation("Mismatched number of items in buffer"));
        }

        let mut pos = start;
        let mut values = data.iter();
        'elements: loop {
            for seg in format.segments() {
                if let Segment::Component { mode, bits, .. } = *seg {
                    let Some(value) = values.next() else {
                        break 'elements;
                    };
                    let dst = self.bytes.get_mut(pos..).unwrap_or_default();
                    copy_value_to_buffer(dst, &component_value(value, mode), 0, bits)?;
                }
                pos += seg.size_in_bytes() as usize;
            }
            if values.len() == 0 {
                break;
            }
        }
        Ok(())
    }

    /// Grow the recorded maximum size to cover `data` written at `offset`.
    pub fn recalculate_max_size_in_bytes(&mut self, data: &[Value], offset: u32) -> RecipeResult<()> {
        let format = self.require_format()?;
        let (stride, inputs) = self.element_shape(format)?;
        let value_count = self.value_count_for(format, data, offset)?;
        let element_count = if format.is_packed() {
            value_count
        } else {
            value_count / inputs
        };
        let size = element_count * stride;
        if self.max_size_in_bytes() < size {
            self.max_size_in_bytes = size;
        }
        Ok(())
    }

    /// Resize to exactly `element_count` elements.
    pub fn set_size_in_elements(&mut self, element_count: u32) -> RecipeResult<()> {
        let stride = self.require_format()?.size_in_bytes();
        self.element_count = element_count;
        self.bytes.resize((element_count * stride) as usize, 0);
        Ok(())
    }

    /// Resize to exactly `size_in_bytes` bytes, a whole number of elements.
    pub fn set_size_in_bytes(&mut self, size_in_bytes: u32) -> RecipeResult<()> {
        let (stride, _) = self.element_shape(self.require_format()?)?;
        if size_in_bytes % stride != 0 {
            return Err(RecipeError::validation(format!(
                "buffer {} size of {size_in_bytes} bytes is not a multiple of the element size {stride}",
                self.name
            )));
        }
        self.element_count = size_in_bytes / stride;
        self.bytes.resize(size_in_bytes as usize, 0);
        Ok(())
    }

    /// Largest size the buffer reaches over the script; the current size when never set.
    pub fn max_size_in_bytes(&self) -> u32 {
        if self.max_size_in_bytes != 0 {
            self.max_size_in_bytes
        } else {
            self.size_in_bytes()
        }
    }

    /// Record an explicit maximum size.
    pub fn set_max_size_in_bytes(&mut self, size: u32) {
        self.max_size_in_bytes = size;
    }

    /// Copy the raw contents of `src` in at byte `offset`, growing as needed.
    pub fn set_data_from_buffer(&mut self, src: &Buffer, offset: u32) -> RecipeResult<()> {
        let (stride, _) = self.element_shape(self.require_format()?)?;
        let start = offset as usize;
        let end = start + src.bytes.len();
        if self.bytes.len() < end {
            self.bytes.resize(end, 0);
        }
        self.bytes[start..end].copy_from_slice(&src.bytes);
        self.element_count = self.bytes.len() as u32 / stride;
        Ok(())
    }

    /// Overwrite the contents of `dst`, which must have the same shape.
    pub fn copy_to(&self, dst: &mut Buffer) -> RecipeResult<()> {
        if dst.width != self.width {
            return Err(RecipeError::validation(
                "Buffer::CopyBaseFields() buffers have a different width",
            ));
        }
        if dst.height != self.height {
            return Err(RecipeError::validation(
                "Buffer::CopyBaseFields() buffers have a different height",
            ));
        }
        if dst.element_count != self.element_count {
            return Err(RecipeError::validation(
                "Buffer::CopyBaseFields() buffers have a different size",
            ));
        }
        dst.bytes.clone_from(&self.bytes);
        Ok(())
    }

    /// Fail unless both buffers share format, size and dimensions.
    pub fn check_compatibility(&self, other: &Buffer) -> RecipeResult<()> {
        let same_format = match (&self.format, &other.format) {
            (Some(a), Some(b)) => a.equal(b),
            _ => false,
        };
        let msg = if !same_format {
            "Buffers have a different format"
        } else if other.element_count != self.element_count {
            "Buffers have a different size"
        } else if other.width != self.width {
            "Buffers have a different width"
        } else if other.height != self.height {
            "Buffers have a different height"
        } else if other.value_count() != self.value_count() {
            "Buffers have a different number of values"
        } else {
            return Ok(());
        };
        Err(RecipeError::validation(msg))
    }

    /// Byte-exact comparison.
    pub fn is_equal(&self, other: &Buffer) -> RecipeResult<()> {
        self.check_compatibility(other)?;

        let mut diffs = self
            .bytes
            .iter()
            .zip(&other.bytes)
            .enumerate()
            .filter(|(_, (a, b))| a != b);
        let Some((first, (left, right))) = diffs.next() else {
            return Ok(());
        };
        let num_different = 1 + diffs.count();
        Err(RecipeError::validation(format!(
            "Buffers have different values. {num_different} values differed, first difference at byte {first} values {left} != {right}"
        )))
    }

    // Per-component differences, padding skipped.
    fn calculate_diffs(&self, other: &Buffer, format: &Format) -> RecipeResult<Vec<f64>> {
        let mut diffs = Vec::new();
        let mut pos = 0usize;
        for _ in 0..self.element_count {
            for seg in format.segments() {
                if let Segment::Component { mode, bits, .. } = *seg {
                    let a = read_component(&self.bytes, pos, mode, bits)?;
                    let b = read_component(&other.bytes, pos, mode, bits)?;
                    diffs.push(a - b);
                }
                pos += seg.size_in_bytes() as usize;
            }
        }
        Ok(diffs)
    }

    /// Root-mean-square comparison against `tolerance`.
    pub fn compare_rmse(&self, other: &Buffer, tolerance: f32) -> RecipeResult<()> {
        self.check_compatibility(other)?;
        let format = self.require_format()?;

        let diffs = self.calculate_diffs(other, format)?;
        let sum: f64 = diffs.iter().map(|d| d * d).sum();
        let rmse = (sum / diffs.len() as f64).sqrt();
        if rmse > f64::from(tolerance) {
            return Err(RecipeError::validation(format!(
                "Root Mean Square Error of {rmse:.6} is greater than tolerance of {tolerance:.6}"
            )));
        }
        Ok(())
    }

    /// 256-bin histogram of one 8-bit channel.
    pub fn histogram_for_channel(&self, channel: u32) -> RecipeResult<Vec<u64>> {
        let format = self.require_format()?;
        let num_channels = format.input_needed_per_element();
        let mut bins = vec![0u64; 256];
        let mut pos = 0usize;
        let mut channel_id = 0u32;
        for _ in 0..self.element_count {
            for seg in format.segments() {
                if !seg.is_padding() {
                    if channel_id == channel {
                        let bin = self.bytes.get(pos).copied().ok_or_else(|| {
                            RecipeError::validation(format!(
                                "buffer {} is smaller than its element count",
                                self.name
                            ))
                        })?;
                        bins[usize::from(bin)] += 1;
                    }
                    channel_id = (channel_id + 1) % num_channels;
                }
                pos += seg.size_in_bytes() as usize;
            }
        }
        Ok(bins)
    }

    /// Earth mover's distance between per-channel histograms against `tolerance`.
    ///
    /// Only four-channel 8-bit unsigned formats are supported.
    pub fn compare_histogram_emd(&self, other: &Buffer, tolerance: f32) -> RecipeResult<()> {
        self.check_compatibility(other)?;
        let format = self.require_format()?;

        let num_channels = format.input_needed_per_element();
        let supported = num_channels == 4
            && format.segments().iter().all(|seg| match *seg {
                Segment::Component { mode, bits, .. } => is_uint8(mode, bits),
                Segment::Padding { .. } => false,
            });
        if !supported {
            return Err(RecipeError::validation(
                "EMD comparison only supports 8bit unorm format with four channels.",
            ));
        }

        let mut max_emd = 0.0f64;
        for c in 0..num_channels {
            let h1 = self.histogram_for_channel(c)?;
            let h2 = other.histogram_for_channel(c)?;

            let mut diff_total = 0.0f64;
            let mut diff_accum = 0.0f64;
            for (a, b) in h1.iter().zip(&h2) {
                let n1 = *a as f64 / f64::from(self.element_count);
                let n2 = *b as f64 / f64::from(other.element_count);
                diff_accum += n1 - n2;
                diff_total += diff_accum.abs();
            }
            max_emd = max_emd.max(diff_total / h1.len() as f64);
        }

        if max_emd > f64::from(tolerance) {
            return Err(RecipeError::validation(format!(
                "Histogram EMD value of {max_emd:.6} is greater than tolerance of {tolerance:.6}"
            )));
        }
        Ok(())
    }
}

// Literals keep the tag they were parsed with; the component decides the encoding.
fn component_value(value: &Value, mode: FormatMode) -> Value {
    match (value, mode.is_float()) {
        (Value::Int(_), true) => Value::from_double(value.as_double()),
        (Value::Double(_), false) => Value::from_signed(value.as_int64()),
        _ => *value,
    }
}

fn read_component(bytes: &[u8], pos: usize, mode: FormatMode, bits: u32) -> RecipeResult<f64> {
    let src = bytes.get(pos..).unwrap_or_default();
    let mut raw = [0u8; 8];
    copy_memory_to_buffer(&mut raw, src, 0, bits)?;
    let word = u64::from_le_bytes(raw);

    if is_float16(mode, bits) {
        return Ok(f64::from(hex_float_to_float(word as u16, 16)?));
    }
    if is_float32(mode, bits) {
        return Ok(f64::from(f32::from_bits(word as u32)));
    }
    if is_float64(mode, bits) {
        return Ok(f64::from_bits(word));
    }
    if mode.is_signed_int() {
        let shift = 64 - bits.clamp(1, 64);
        return Ok((((word << shift) as i64) >> shift) as f64);
    }
    Ok(word as f64)
}

#[cfg(test)]
#[path = "../../tests/unit/recipe/buffer.rs"]
mod tests;
