//!
//! # Gpf21 Data Model
//!

// Std-Lib Imports
use std::error::Error;
use std::io::Write;
use std::path::{Path, PathBuf};

// Crates.io
use chrono::{NaiveDateTime, Utc};
use derive_builder::Builder;
use derive_more::{Add, AddAssign};
use serde::{Deserialize, Serialize};

// Workspace Imports
use ebeam21utils::SerdeFile;

// Local Imports
use crate::read::GpfParser;
use crate::write::GpfWriter;

/// Format version written and accepted by this crate
pub const GPF_VERSION: &str = "1.0";
/// Document length units. All `POLY` coordinates are micrometers.
pub const GPF_UNITS: &str = "1.0um";
/// Comment-marker introducing the trailer payload
pub const GPF_PAYLOAD_MARKER: &str = "# GEOMETRY payload base64";

/// Timestamp format for the header's `Exported at` field
pub const GPF_TIMESTAMP_FMT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// # Gpf Point
///
/// A single vertex of a [GpfPoly], in micrometers.
///
#[derive(Debug, Default, Clone, Copy, Add, AddAssign, Serialize, Deserialize, PartialEq)]
pub struct GpfPoint {
    pub x: f64,
    pub y: f64,
}
impl GpfPoint {
    /// Create a new [GpfPoint] from (x, y) coordinates
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// # Gpf Polygon Record
///
/// One exposure primitive: a convex polygon of three or four vertices.
/// Gpf21 stores whatever vertex-count it is given;
/// the three-or-four bound is enforced when parsing,
/// and by the geometry pipeline when generating.
///
#[derive(Debug, Default, Clone, Serialize, Deserialize, PartialEq)]
pub struct GpfPoly {
    /// Vertex coordinates, in micrometers
    pub points: Vec<GpfPoint>,
}
impl GpfPoly {
    /// Create a new [GpfPoly] from a vector of vertices
    pub fn new(points: Vec<GpfPoint>) -> Self {
        Self { points }
    }
}

/// # Gpf Layer Block
///
/// One `LAYER ... ENDLAYER` block:
/// a source layer/datatype pair, its display label,
/// its relative dose multiplier, and its ordered polygon records.
///
#[derive(Debug, Default, Clone, Builder, Serialize, Deserialize, PartialEq)]
#[builder(setter(into))]
pub struct GpfLayer {
    /// One-based position of this block in the document
    pub index: usize,
    /// Source layer number
    pub layernum: i16,
    /// Source datatype number
    pub datatype: i16,
    /// Display label
    pub label: String,
    /// Relative dose multiplier
    pub dose: f64,
    /// Ordered polygon records
    #[builder(default)]
    pub polys: Vec<GpfPoly>,
}

/// # Gpf Header
///
/// Document-level metadata, rendered as the comment block and
/// `VERSION`/`UNITS` records at the top of the file.
///
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GpfHeader {
    /// Name of the generating tool
    pub generator: String,
    /// Export timestamp, UTC
    pub exported_at: NaiveDateTime,
    /// Source cell name
    pub source: String,
    /// Database unit of the originating layout, in micrometers
    pub dbu_um: f64,
}
impl GpfHeader {
    /// Create a new [GpfHeader], timestamped now
    pub fn new(generator: impl Into<String>, source: impl Into<String>, dbu_um: f64) -> Self {
        Self {
            generator: generator.into(),
            exported_at: Utc::now().naive_utc(),
            source: source.into(),
            dbu_um,
        }
    }
}
impl Default for GpfHeader {
    fn default() -> Self {
        Self::new("gpf21", "TOP", 1e-3)
    }
}

/// # Gpf Trailer Payload
///
/// Opaque byte content embedded after the `END` record,
/// base64-encoded on disk.
/// Conventionally a snapshot of the pristine source geometry,
/// used for provenance verification and never re-parsed into a live export.
///
#[derive(Debug, Default, Clone, Serialize, Deserialize, PartialEq)]
pub struct GpfPayload(pub Vec<u8>);
impl GpfPayload {
    /// Create a payload from raw bytes
    pub fn new(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }
    /// Base64-encode to the on-disk form
    pub fn encode(&self) -> String {
        base64::encode(&self.0)
    }
    /// Decode from the on-disk base64 form
    pub fn decode(s: &str) -> GpfResult<Self> {
        let bytes = base64::decode(s.trim())
            .map_err(|e| GpfError::Payload(format!("invalid base64 payload: {}", e)))?;
        Ok(Self(bytes))
    }
    /// Access the raw bytes
    pub fn bytes(&self) -> &[u8] {
        &self.0
    }
}

/// # Gpf Document
///
/// The root of the GPF content tree: header metadata,
/// ordered layer blocks, and the trailer payload.
/// On-disk each [GpfDocument] is paired one-to-one with a `.gpf` file.
///
#[derive(Debug, Default, Clone, Serialize, Deserialize, PartialEq)]
pub struct GpfDocument {
    /// Header metadata
    pub header: GpfHeader,
    /// Ordered layer blocks
    pub layers: Vec<GpfLayer>,
    /// Trailer payload
    pub payload: GpfPayload,
}
impl GpfDocument {
    /// Create a new [GpfDocument] with header `header` and no layers
    pub fn new(header: GpfHeader) -> Self {
        Self {
            header,
            ..Default::default()
        }
    }
    /// Read a [GpfDocument] from the file at path `fname`
    pub fn open(fname: impl AsRef<Path>) -> GpfResult<GpfDocument> {
        let bytes = std::fs::read(&fname)?;
        Self::from_bytes(&bytes)
    }
    /// Read a [GpfDocument] from byte-slice `bytes`
    pub fn from_bytes(bytes: &[u8]) -> GpfResult<GpfDocument> {
        let s = std::str::from_utf8(bytes)?;
        GpfParser::parse(s)
    }
    /// Write to `dest` in the on-disk ASCII form
    pub fn write(&self, dest: impl Write) -> GpfResult<()> {
        let mut wr = GpfWriter::new(dest);
        wr.write_doc(self)
    }
    /// Render to an in-memory byte-vector.
    /// A pure function of `self`: equal documents render to equal bytes.
    pub fn to_bytes(&self) -> GpfResult<Vec<u8>> {
        let mut bytes = Vec::new();
        self.write(&mut bytes)?;
        Ok(bytes)
    }
    /// Save to file `fname`.
    /// Writes to a temporary sibling file, flushes and syncs it,
    /// then atomically renames over `fname`,
    /// so that no reader or crash ever observes a partial file.
    pub fn save(&self, fname: impl AsRef<Path>) -> GpfResult<()> {
        let fname = fname.as_ref();
        let write_err = |msg: String| GpfError::Write {
            path: fname.to_path_buf(),
            message: msg,
        };
        let dir = match fname.parent() {
            Some(d) if !d.as_os_str().is_empty() => d.to_path_buf(),
            _ => PathBuf::from("."),
        };
        let mut tmp = tempfile::NamedTempFile::new_in(&dir).map_err(|e| write_err(e.to_string()))?;
        self.write(&mut tmp).map_err(|e| write_err(e.to_string()))?;
        tmp.flush().map_err(|e| write_err(e.to_string()))?;
        tmp.as_file().sync_all().map_err(|e| write_err(e.to_string()))?;
        tmp.persist(fname).map_err(|e| write_err(e.to_string()))?;
        Ok(())
    }
    /// Collect and return the document's aggregate statistics
    /// (numbers of layers, polygons, and vertices)
    pub fn stats(&self) -> GpfStats {
        let mut stats = GpfStats::default();
        for layer in self.layers.iter() {
            stats += layer.stats();
        }
        stats
    }
    /// Render a plain-text "beam write simulation" report:
    /// a per-layer summary of polygon and vertex counts,
    /// with starting coordinates at three decimal places.
    pub fn simulation_report(&self) -> String {
        let mut lines = vec![
            "Beam write simulation".to_string(),
            "=====================".to_string(),
            format!(
                "Exported at {}",
                self.header.exported_at.format(GPF_TIMESTAMP_FMT)
            ),
            format!("Source cell {}", self.header.source),
        ];
        for layer in self.layers.iter() {
            lines.push(format!(
                "Layer {} ({}): {} polygons, dose {:.3}",
                layer.index,
                layer.label,
                layer.polys.len(),
                layer.dose,
            ));
            for (num, poly) in layer.polys.iter().enumerate() {
                let start = poly.points.first().copied().unwrap_or_default();
                lines.push(format!(
                    "  Polygon {} with {} vertices starting at ({:.3}, {:.3})",
                    num + 1,
                    poly.points.len(),
                    start.x,
                    start.y,
                ));
            }
        }
        let stats = self.stats();
        lines.push(format!(
            "{} polygons total across {} layers",
            stats.polys, stats.layers
        ));
        let mut report = lines.join("\n");
        report.push('\n');
        report
    }
}
impl GpfLayer {
    /// Collect this block's statistics
    pub fn stats(&self) -> GpfStats {
        GpfStats {
            layers: 1,
            polys: self.polys.len(),
            vertices: self.polys.iter().map(|p| p.points.len()).sum(),
        }
    }
}
// Enable [GpfDocument] and [GpfLayer] serialization to file, in each of `utils` supported formats.
impl SerdeFile for GpfDocument {}
impl SerdeFile for GpfLayer {}

/// # Gpf Document Statistics
/// Summary counts of a document's content, as collected by [GpfDocument::stats]
#[derive(Debug, Default, Clone, Copy, Add, AddAssign, PartialEq, Eq)]
pub struct GpfStats {
    pub layers: usize,
    pub polys: usize,
    pub vertices: usize,
}

/// # Gpf Context
/// Enumeration of each context in which a record can be parsed, primarily for error reporting
#[derive(Debug, Clone)]
pub enum GpfContext {
    Header,
    Layer,
    Dose,
    Poly,
    Trailer,
    Payload,
}

/// # GpfResult Type-Alias
pub type GpfResult<T> = Result<T, GpfError>;

/// # Gpf Error Enumeration
/// Most errors are tied in some sense to parsing the line-oriented format.
/// Once a valid [GpfDocument] exists in memory, it can generally be streamed to bytes.
#[derive(Debug)]
pub enum GpfError {
    /// Parser Errors
    Parse {
        message: String,
        line: String,
        linenum: usize,
        ctx: Vec<GpfContext>,
    },
    /// Unsupported format-version
    Version(String),
    /// Invalid trailer payload
    Payload(String),
    /// Destination-file write failure
    Write { path: PathBuf, message: String },
    /// Boxed (External) Errors
    Boxed(Box<dyn Error>),
    /// Other errors
    Str(String),
}
impl std::fmt::Display for GpfError {
    /// Display a [GpfError].
    /// This functionally delegates to the (derived) [std::fmt::Debug] implementation.
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}
impl std::error::Error for GpfError {}
impl From<std::io::Error> for GpfError {
    fn from(e: std::io::Error) -> Self {
        Self::Boxed(Box::new(e))
    }
}
impl From<std::str::Utf8Error> for GpfError {
    fn from(e: std::str::Utf8Error) -> Self {
        Self::Boxed(Box::new(e))
    }
}
impl From<String> for GpfError {
    fn from(e: String) -> Self {
        GpfError::Str(e)
    }
}
impl From<&str> for GpfError {
    fn from(e: &str) -> Self {
        GpfError::Str(e.to_string())
    }
}
impl From<ebeam21utils::ser::Error> for GpfError {
    fn from(e: ebeam21utils::ser::Error) -> Self {
        Self::Boxed(Box::new(e))
    }
}
