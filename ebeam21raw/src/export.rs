//!
//! # Export Pipeline & GPF Conversion
//!
//! The pipeline's single entry point, [export], plus the conversion from
//! the raw [ExportDocument] to a [gpf21::GpfDocument].
//!
//! Stage order is a design requirement, not an implementation detail:
//! healing runs before fracturing, so the fracture stage always consumes
//! simple polygons with holes. Each included layer is processed
//! independently, in stable input order.
//!

// Std-Lib
use std::path::Path;

// Crates.io
use tracing::{info, warn};

// Local Imports
use crate::data::{
    DocLayer, ExportDocument, ExportHeader, ExportReport, ExportWarning, Fragment, Layer,
};
use crate::error::{ErrorContext, ExportError, ExportResult};
use crate::fracture::fracture_polygon;
use crate::geom::{Polygon, Ring};
use crate::heal::heal_layer;

/// Export `layers` to destination path `dest`.
///
/// The single pipeline operation: validates configuration, cleans, heals,
/// and fractures each included layer, annotates doses, serializes the
/// document, and atomically writes it to `dest`. On success, returns an
/// [ExportReport] of document statistics and recorded warnings.
///
/// Fatal failures leave no partial file at `dest`.
pub fn export(
    layers: &[Layer],
    header: &ExportHeader,
    dest: impl AsRef<Path>,
) -> ExportResult<ExportReport> {
    let dest = dest.as_ref();
    let (doc, warnings) = assemble(layers, header)?;
    let gpf = doc.to_gpf()?;
    let stats = gpf.stats();
    gpf.save(dest)?;
    info!(
        path = %dest.display(),
        layers = stats.layers,
        polys = stats.polys,
        "wrote exposure file"
    );
    Ok(ExportReport { warnings, stats })
}

/// Run the geometry pipeline over `layers`, assembling the immutable
/// [ExportDocument] and collecting recoverable warnings.
/// Performs no file IO.
pub fn assemble(
    layers: &[Layer],
    header: &ExportHeader,
) -> ExportResult<(ExportDocument, Vec<ExportWarning>)> {
    GpfExporter::new(header).export_all(layers)
}

/// Attach `layer`'s relative dose to each fractured piece.
/// Purely metadata propagation; the geometry is untouched.
pub fn annotate(layer: &Layer, pieces: Vec<Ring>) -> Vec<Fragment> {
    pieces
        .into_iter()
        .map(|ring| Fragment {
            layernum: layer.layernum,
            datatype: layer.datatype,
            dose: layer.dose,
            ring,
        })
        .collect()
}

/// # Gpf Exporter
/// Walks the layer list through the heal / fracture / dose stages,
/// carrying a context stack for error attribution.
struct GpfExporter<'h> {
    header: &'h ExportHeader,
    warnings: Vec<ExportWarning>,
    ctx_stack: Vec<ErrorContext>,
}
impl<'h> GpfExporter<'h> {
    fn new(header: &'h ExportHeader) -> Self {
        Self {
            header,
            warnings: Vec::new(),
            ctx_stack: Vec::new(),
        }
    }
    fn export_all(mut self, layers: &[Layer]) -> ExportResult<(ExportDocument, Vec<ExportWarning>)> {
        // Validate all configuration before touching any geometry
        if !self.header.dbu_um.is_finite() || self.header.dbu_um <= 0.0 {
            return Err(ExportError::validation(format!(
                "invalid database unit {}um",
                self.header.dbu_um
            )));
        }
        for layer in layers.iter() {
            layer.validate()?;
        }
        // The trailer snapshot is taken from the pristine extracted geometry,
        // before healing or fracturing touches anything
        let snapshot: Vec<Layer> = layers.iter().filter(|l| l.included).cloned().collect();

        let mut doc_layers = Vec::new();
        for layer in snapshot.iter() {
            self.ctx_stack.push(ErrorContext::Layer(layer.label()));
            if let Some(block) = self.export_layer(layer, doc_layers.len() + 1)? {
                doc_layers.push(block);
            }
            self.ctx_stack.pop();
        }
        let doc = ExportDocument {
            header: self.header.clone(),
            layers: doc_layers,
            snapshot,
        };
        Ok((doc, self.warnings))
    }
    /// Run one layer through the geometry stages.
    /// Returns [None] for layers left with no valid geometry,
    /// which are omitted from the document rather than failing it.
    fn export_layer(&mut self, layer: &Layer, index: usize) -> ExportResult<Option<DocLayer>> {
        let label = layer.label();
        let polys = self.cleaned_polys(layer, &label);
        let polys = if layer.heal {
            heal_layer(&polys).map_err(|e| self.located(e, &label))?
        } else {
            polys
        };
        let mut pieces = Vec::new();
        for poly in polys.iter() {
            let fractured = fracture_polygon(poly).map_err(|e| self.located(e, &label))?;
            pieces.extend(fractured);
        }
        let fragments = annotate(layer, pieces);
        if fragments.is_empty() {
            return Ok(None);
        }
        Ok(Some(DocLayer {
            index,
            layernum: layer.layernum,
            datatype: layer.datatype,
            label,
            dose: layer.dose,
            fragments,
        }))
    }
    /// Degeneracy cleanup over `layer`'s polygons.
    /// Degenerate rings are dropped with a recorded warning;
    /// they never abort the export.
    fn cleaned_polys(&mut self, layer: &Layer, label: &str) -> Vec<Polygon> {
        let mut out = Vec::with_capacity(layer.polys.len());
        for (pidx, poly) in layer.polys.iter().enumerate() {
            let outer = match poly.outer.cleaned() {
                Some(ring) => ring,
                None => {
                    self.warn_ring(label, format!("degenerate outer ring of polygon {}", pidx));
                    continue;
                }
            };
            let mut holes = Vec::with_capacity(poly.holes.len());
            for (hidx, hole) in poly.holes.iter().enumerate() {
                match hole.cleaned() {
                    Some(ring) => holes.push(ring),
                    None => self.warn_ring(
                        label,
                        format!("degenerate hole {} of polygon {}", hidx, pidx),
                    ),
                }
            }
            out.push(Polygon::with_holes(outer, holes));
        }
        out
    }
    /// Record (and log) a dropped-ring warning
    fn warn_ring(&mut self, label: &str, detail: String) {
        warn!(layer = label, detail = detail.as_str(), "dropping ring");
        self.warnings.push(ExportWarning::DegenerateRing {
            layer: label.to_string(),
            detail,
        });
    }
    /// Attribute geometry-error `e` to layer `label`, with our context stack
    fn located(&self, e: ExportError, label: &str) -> ExportError {
        match e.in_layer(label) {
            ExportError::Geometry {
                message,
                layer,
                stack: _,
            } => ExportError::Geometry {
                message,
                layer,
                stack: self.ctx_stack.clone(),
            },
            other => other,
        }
    }
}

impl ExportDocument {
    /// Convert to a [gpf21::GpfDocument]: scale fragments from database
    /// units to micrometers, and embed the JSON-serialized pristine
    /// snapshot as the trailer payload.
    pub fn to_gpf(&self) -> ExportResult<gpf21::GpfDocument> {
        let dbu = self.header.dbu_um;
        let layers = self
            .layers
            .iter()
            .map(|block| gpf21::GpfLayer {
                index: block.index,
                layernum: block.layernum,
                datatype: block.datatype,
                label: block.label.clone(),
                dose: block.dose,
                polys: block
                    .fragments
                    .iter()
                    .map(|frag| {
                        gpf21::GpfPoly::new(
                            frag.points()
                                .iter()
                                .map(|p| gpf21::GpfPoint::new(p.x as f64 * dbu, p.y as f64 * dbu))
                                .collect(),
                        )
                    })
                    .collect(),
            })
            .collect();
        let payload = gpf21::GpfPayload::new(serde_json::to_vec(&self.snapshot)?);
        Ok(gpf21::GpfDocument {
            header: gpf21::GpfHeader {
                generator: self.header.generator.clone(),
                exported_at: self.header.exported_at,
                source: self.header.cell.clone(),
                dbu_um: dbu,
            },
            layers,
            payload,
        })
    }
}

/// Decode a document trailer back into the pristine snapshot layers.
/// For provenance verification only; decoded geometry is never fed back
/// into a live export.
pub fn decode_snapshot(payload: &gpf21::GpfPayload) -> ExportResult<Vec<Layer>> {
    Ok(serde_json::from_slice(payload.bytes())?)
}
