//! Safetensors I/O for gridded fields.
//!
//! Reader: `FieldData::load` parses a file holding a `data` tensor
//! (`[time, ...]`, F32 or F64) and an optional scalar `sampling_interval`.
//! Writer: [`StWriter`] collects named F64/I32 tensors and writes them in one
//! go.
use anyhow::{bail, Context, Result};
use ndarray::{ArrayBase, ArrayD, Data, Dimension, IxDyn};
use std::collections::HashMap;
use std::path::Path;

// ── Low-level safetensors parser ─────────────────────────────────────────────

type Header = HashMap<String, serde_json::Value>;

fn parse_header(bytes: &[u8]) -> Result<(Header, usize)> {
    if bytes.len() < 8 {
        bail!("safetensors file too small");
    }
    let mut len = [0u8; 8];
    len.copy_from_slice(&bytes[..8]);
    let n = u64::from_le_bytes(len) as usize;
    let end = 8usize
        .checked_add(n)
        .filter(|&e| e <= bytes.len())
        .context("safetensors header length exceeds file size")?;
    let header: Header =
        serde_json::from_slice(&bytes[8..end]).context("failed to parse safetensors header")?;
    Ok((header, end))
}

fn shape_of(entry: &serde_json::Value) -> Result<Vec<usize>> {
    entry["shape"]
        .as_array()
        .context("tensor entry has no 'shape'")?
        .iter()
        .map(|v| v.as_u64().map(|d| d as usize).context("non-integer dimension"))
        .collect()
}

fn raw_bytes<'a>(bytes: &'a [u8], data_start: usize, entry: &serde_json::Value) -> Result<&'a [u8]> {
    let offsets = entry["data_offsets"]
        .as_array()
        .context("tensor entry has no 'data_offsets'")?;
    if offsets.len() != 2 {
        bail!("'data_offsets' must have two elements");
    }
    let s = offsets[0].as_u64().context("bad start offset")? as usize;
    let e = offsets[1].as_u64().context("bad end offset")? as usize;
    bytes
        .get(data_start + s..data_start + e)
        .context("tensor data out of bounds")
}

/// Decode a tensor as `f64`, widening F32.
fn read_f64_tensor(bytes: &[u8], data_start: usize, entry: &serde_json::Value) -> Result<ArrayD<f64>> {
    let dtype = entry["dtype"].as_str().context("tensor entry has no 'dtype'")?;
    let raw = raw_bytes(bytes, data_start, entry)?;
    let vals: Vec<f64> = match dtype {
        "F32" => raw
            .chunks_exact(4)
            .map(|b| f32::from_le_bytes([b[0], b[1], b[2], b[3]]) as f64)
            .collect(),
        "F64" => raw
            .chunks_exact(8)
            .map(|b| f64::from_le_bytes([b[0], b[1], b[2], b[3], b[4], b[5], b[6], b[7]]))
            .collect(),
        other => bail!("unsupported dtype {other} (expected F32 or F64)"),
    };
    let shape = shape_of(entry)?;
    ArrayD::from_shape_vec(IxDyn(&shape), vals).context("tensor size does not match its shape")
}

// ── Public structs ────────────────────────────────────────────────────────────

/// A gridded field loaded from safetensors.
pub struct FieldData {
    /// `[time, ...]` values, e.g. `[T, lat, lon]` vorticity.
    pub data: ArrayD<f64>,
    /// Time step of `data`, if the file records it.
    pub sampling_interval: Option<f64>,
}

impl FieldData {
    pub fn load(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path)
            .with_context(|| format!("reading {}", path.display()))?;
        Self::from_bytes(&bytes)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let (header, data_start) = parse_header(bytes)?;

        let data_entry = header.get("data").context("missing 'data' key")?;
        let data = read_f64_tensor(bytes, data_start, data_entry)?;

        // The sampling interval is optional.
        let sampling_interval = match header.get("sampling_interval") {
            Some(e) => {
                let v = read_f64_tensor(bytes, data_start, e)?;
                Some(*v.iter().next().context("empty 'sampling_interval' tensor")?)
            }
            None => None,
        };

        Ok(FieldData { data, sampling_interval })
    }
}

// ── Generic safetensors builder ───────────────────────────────────────────────

/// Simple safetensors writer for F64 and I32 tensors.
///
/// Usage:
/// ```rust,no_run
/// use tcseed::io::StWriter;
/// use std::path::Path;
/// let mut w = StWriter::new();
/// w.add_f64("weights", &[0.25, 0.5, 0.25], &[3]);
/// w.add_i32("time_offset", &[25], &[1]);
/// w.write(Path::new("/tmp/out.safetensors")).unwrap();
/// ```
#[derive(Default)]
pub struct StWriter {
    entries: Vec<(String, Vec<u8>, &'static str, Vec<usize>)>,
}

impl StWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_f64(&mut self, name: &str, data: &[f64], shape: &[usize]) {
        let bytes: Vec<u8> = data.iter().flat_map(|v| v.to_le_bytes()).collect();
        self.entries.push((name.to_string(), bytes, "F64", shape.to_vec()));
    }

    /// Add an array of any rank (written in logical row-major order).
    pub fn add_f64_arr<S, D>(&mut self, name: &str, arr: &ArrayBase<S, D>)
    where
        S: Data<Elem = f64>,
        D: Dimension,
    {
        let data: Vec<f64> = arr.iter().copied().collect();
        self.add_f64(name, &data, arr.shape());
    }

    pub fn add_i32(&mut self, name: &str, data: &[i32], shape: &[usize]) {
        let bytes: Vec<u8> = data.iter().flat_map(|v| v.to_le_bytes()).collect();
        self.entries.push((name.to_string(), bytes, "I32", shape.to_vec()));
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut header_map = serde_json::Map::new();
        let mut offset: usize = 0;
        for (name, data, dtype, shape) in &self.entries {
            header_map.insert(name.clone(), serde_json::json!({
                "dtype": dtype,
                "shape": shape,
                "data_offsets": [offset, offset + data.len()],
            }));
            offset += data.len();
        }
        let hdr_bytes = serde_json::to_vec(&header_map)?;
        let pad = (8 - hdr_bytes.len() % 8) % 8;

        let mut out = Vec::with_capacity(8 + hdr_bytes.len() + pad + offset);
        out.extend_from_slice(&((hdr_bytes.len() + pad) as u64).to_le_bytes());
        out.extend_from_slice(&hdr_bytes);
        out.extend(std::iter::repeat(b' ').take(pad));
        for (_, data, _, _) in &self.entries {
            out.extend_from_slice(data);
        }
        Ok(out)
    }

    pub fn write(&self, path: &Path) -> Result<()> {
        let bytes = self.to_bytes()?;
        std::fs::write(path, bytes).with_context(|| format!("writing {}", path.display()))
    }
}
