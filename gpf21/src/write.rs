//!
//! # Gpf21 Line-Encoding and Writing
//!

// Std-Lib Imports
use std::fs::File;
use std::io::{BufWriter, Write};

// Local imports
use super::*;

/// Format a micrometer coordinate at the document's fixed precision.
/// Six decimal places; values differing only below that precision
/// render identically.
pub(crate) fn fmt_um(val: f64) -> String {
    format!("{:.6}", val)
}
/// Format a dose multiplier at the document's fixed precision (three decimal places).
pub(crate) fn fmt_dose(val: f64) -> String {
    format!("{:.3}", val)
}

/// Gpf Writing Helper
pub struct GpfWriter<'wr> {
    /// Write Destination
    dest: Box<dyn Write + 'wr>,
}
impl<'wr> GpfWriter<'wr> {
    /// Create a new [GpfWriter] with destination file `fname`
    pub fn open(fname: &str) -> GpfResult<Self> {
        let file = BufWriter::new(File::create(fname)?);
        Ok(Self::new(file))
    }
    /// Create a new [GpfWriter] to destination `dest`
    pub fn new(dest: impl Write + 'wr) -> Self {
        Self {
            dest: Box::new(dest),
        }
    }
    /// Write a [GpfDocument] to the destination.
    /// A pure function of `doc`: equal documents produce identical bytes.
    /// Layer blocks with zero polygon records are omitted entirely,
    /// never emitted as empty blocks.
    pub fn write_doc(&mut self, doc: &GpfDocument) -> GpfResult<()> {
        self.write_header(&doc.header)?;
        for layer in doc.layers.iter() {
            if layer.polys.is_empty() {
                continue;
            }
            self.write_layer(layer)?;
        }
        self.write_line("END")?;
        self.write_payload(&doc.payload)?;
        Ok(())
    }
    /// Write the header comment block and `VERSION`/`UNITS` records
    fn write_header(&mut self, header: &GpfHeader) -> GpfResult<()> {
        self.write_line("# Raith Generic Pattern Format (GPF)")?;
        self.write_line(&format!("# Generated by {}", header.generator))?;
        self.write_line(&format!(
            "# Exported at {}",
            header.exported_at.format(GPF_TIMESTAMP_FMT)
        ))?;
        self.write_line(&format!("# Source: {}", header.source))?;
        self.write_line(&format!("# Original database unit: {}um", header.dbu_um))?;
        self.write_line(&format!("VERSION {}", GPF_VERSION))?;
        self.write_line(&format!("UNITS {}", GPF_UNITS))?;
        Ok(())
    }
    /// Write [GpfLayer] `layer`'s block to the destination
    fn write_layer(&mut self, layer: &GpfLayer) -> GpfResult<()> {
        self.write_line(&format!(
            "LAYER {} {} {} LABEL \"{}\"",
            layer.index, layer.layernum, layer.datatype, layer.label
        ))?;
        self.write_line(&format!("DOSE {}", fmt_dose(layer.dose)))?;
        for poly in layer.polys.iter() {
            self.write_poly(poly)?;
        }
        self.write_line("ENDLAYER")?;
        Ok(())
    }
    /// Write one `POLY` record
    fn write_poly(&mut self, poly: &GpfPoly) -> GpfResult<()> {
        let mut parts = Vec::with_capacity(2 * poly.points.len() + 2);
        parts.push("POLY".to_string());
        parts.push(poly.points.len().to_string());
        for pt in poly.points.iter() {
            parts.push(fmt_um(pt.x));
            parts.push(fmt_um(pt.y));
        }
        self.write_line(&parts.join(" "))?;
        Ok(())
    }
    /// Write the trailer marker and base64-encoded payload
    fn write_payload(&mut self, payload: &GpfPayload) -> GpfResult<()> {
        self.write_line(GPF_PAYLOAD_MARKER)?;
        self.write_line(&payload.encode())?;
        Ok(())
    }
    /// Write a single newline-terminated ASCII line
    fn write_line(&mut self, line: &str) -> GpfResult<()> {
        self.dest.write_all(line.as_bytes())?;
        self.dest.write_all(b"\n")?;
        Ok(())
    }
}
