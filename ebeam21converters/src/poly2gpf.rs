//!
//! # Polygon-Job to GPF Conversion Implementation
//!
//! The core logic for the `poly2gpf` CLI: load a serialized [ExportJob]
//! describing the source cell and its layer table, run the export
//! pipeline, and write the `.gpf` exposure file.
//!

// Std-Lib
use std::error::Error;

// Crates.io
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

// Workspace Imports
use ebeam21raw::{export, ExportHeader, Layer};
use ebeam21utils::{SerdeFile, SerializationFormat};

/// # Export Job Description
///
/// Everything one export invocation needs, in one serializable bundle:
/// the source cell name, its database unit, the layer table with
/// selection / healing / dose settings, and (optionally) a pinned export
/// timestamp for byte-reproducible output.
///
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExportJob {
    /// Source cell name
    pub cell: String,
    /// Database unit, in micrometers
    pub dbu_um: f64,
    /// Pinned export timestamp. Defaults to the wall clock when absent.
    #[serde(default)]
    pub exported_at: Option<NaiveDateTime>,
    /// Layer table
    pub layers: Vec<Layer>,
}
impl SerdeFile for ExportJob {}

/// # Job-Conversion Options
///
/// *Awfully* similar to the CLI's `ProgramOptions`,
/// without the `clap` annotations.
///
pub struct ConvOptions {
    /// Job Input File
    pub input: String,
    /// Input Format. One of ("json", "yaml", "toml"), or empty to infer
    /// from the input file's extension.
    pub fmt: String,
    /// Output File
    pub out: String,
    /// Verbose Output Mode
    pub verbose: bool,
}

/// Parse the `fmt` string into a [`SerializationFormat`],
/// inferring from the input path when `fmt` is empty.
fn parse_format(fmt: &str, input: &str) -> Result<SerializationFormat, Box<dyn Error>> {
    match fmt {
        "" => Ok(SerializationFormat::from_path(input)),
        "json" => Ok(SerializationFormat::Json),
        "yaml" => Ok(SerializationFormat::Yaml),
        "toml" => Ok(SerializationFormat::Toml),
        _ => Err(format!(
            "Invalid format: {}. Must be one of (json, yaml, toml).",
            fmt
        )
        .into()),
    }
}

/// Core implementation, converting an on-disk job description to an on-disk GPF file.
pub fn convert(options: &ConvOptions) -> Result<(), Box<dyn Error>> {
    let fmt = parse_format(&options.fmt, &options.input)?;
    let job = ExportJob::open(&options.input, fmt)?;

    let mut header = ExportHeader::new(&job.cell, job.dbu_um);
    if let Some(ts) = job.exported_at {
        header = header.at(ts);
    }
    let report = export(&job.layers, &header, &options.out)?;

    if options.verbose {
        println!("{:?}", report.stats);
        for warning in report.warnings.iter() {
            println!("warning: {:?}", warning);
        }
        // Re-open the written document for the beam-write summary
        let doc = gpf21::GpfDocument::open(&options.out)?;
        println!("{}", doc.simulation_report());
        println!("wrote {:?}", &options.out);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use ebeam21raw::{Point, Polygon, Ring};

    /// A two-layer job with a pinned timestamp, for reproducible output
    fn test_job() -> ExportJob {
        let rect = Polygon::new(Ring::new(vec![
            Point::new(0, 0),
            Point::new(2000, 0),
            Point::new(2000, 1000),
            Point::new(0, 1000),
        ]));
        let mut metal = Layer::new(1, 0);
        metal.name = Some("METAL1".into());
        metal.polys.push(rect.clone());
        let mut via = Layer::new(2, 0);
        via.heal = true;
        via.dose = 1.25;
        via.polys.push(rect.clone());
        via.polys.push({
            let mut shifted = rect;
            for p in shifted.outer.points.iter_mut() {
                p.x += 1000;
            }
            shifted
        });
        ExportJob {
            cell: "TOP".into(),
            dbu_um: 1e-3,
            exported_at: Some(
                NaiveDate::from_ymd_opt(1970, 1, 1)
                    .unwrap()
                    .and_hms_opt(0, 0, 1)
                    .unwrap(),
            ),
            layers: vec![metal, via],
        }
    }

    // Run the job-file conversion for format (string) `fmtstr`
    fn test_fmt(fmtstr: &str) {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join(format!("job.{}", fmtstr));
        let out = dir.path().join("out.gpf");

        let fmt = parse_format(fmtstr, "").unwrap();
        test_job().save(fmt, &input).unwrap();

        let options = ConvOptions {
            input: input.to_string_lossy().into_owned(),
            fmt: fmtstr.to_string(),
            out: out.to_string_lossy().into_owned(),
            verbose: true,
        };
        convert(&options).unwrap();

        // Check the written document's content
        let doc = gpf21::GpfDocument::open(&out).unwrap();
        assert_eq!(doc.header.source, "TOP");
        assert_eq!(doc.layers.len(), 2);
        assert_eq!(doc.layers[0].label, "METAL1");
        assert_eq!(doc.layers[0].dose, 1.0);
        assert_eq!(doc.layers[1].dose, 1.25);
        // The healed second layer merges its overlapping rectangles
        assert_eq!(doc.layers[1].polys.len(), 1);
    }

    #[test]
    fn job_json() {
        test_fmt("json");
    }
    #[test]
    fn job_yaml() {
        test_fmt("yaml");
    }

    #[test]
    fn format_inference_from_extension() {
        assert!(matches!(
            parse_format("", "job.json").unwrap(),
            SerializationFormat::Json
        ));
        assert!(matches!(
            parse_format("", "job.yaml").unwrap(),
            SerializationFormat::Yaml
        ));
        assert!(parse_format("markdown", "job.md").is_err());
    }

    #[test]
    fn conversion_is_reproducible() {
        // Pinned timestamps make back-to-back conversions byte-identical
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("job.yaml");
        test_job()
            .save(SerializationFormat::Yaml, &input)
            .unwrap();

        let mut bytes = Vec::new();
        for name in ["first.gpf", "second.gpf"] {
            let out = dir.path().join(name);
            let options = ConvOptions {
                input: input.to_string_lossy().into_owned(),
                fmt: "yaml".to_string(),
                out: out.to_string_lossy().into_owned(),
                verbose: false,
            };
            convert(&options).unwrap();
            bytes.push(std::fs::read(&out).unwrap());
        }
        assert_eq!(bytes[0], bytes[1]);
    }
}
