//!
//! # Gpf21 Line-Decoding and Parsing
//!

// Std-Lib Imports
use std::str::FromStr;

// Crates.io
use chrono::NaiveDateTime;

// Workspace Imports
use ebeam21utils::ErrorHelper;

// Local imports
use super::*;

/// # Gpf Parsing Helper
///
/// Decodes the line-oriented ASCII format back into a [GpfDocument].
/// Maintains the current line and a context-stack for error reporting.
///
pub struct GpfParser<'src> {
    /// Source-line iterator
    lines: std::str::Lines<'src>,
    /// Most recently read line, for error reporting
    line: String,
    /// One-based number of the most recently read line
    linenum: usize,
    /// Context stack
    ctx: Vec<GpfContext>,
}
impl<'src> GpfParser<'src> {
    /// Parse source-string `src` into a [GpfDocument]
    pub fn parse(src: &'src str) -> GpfResult<GpfDocument> {
        let mut this = Self {
            lines: src.lines(),
            line: String::new(),
            linenum: 0,
            ctx: Vec::new(),
        };
        this.parse_doc()
    }
    /// Advance to the next line, returning [None] at end-of-input
    fn next_line(&mut self) -> Option<String> {
        let line = self.lines.next()?;
        self.linenum += 1;
        self.line = line.to_string();
        Some(self.line.clone())
    }
    /// Advance to the next line, failing at end-of-input
    fn expect_line(&mut self) -> GpfResult<String> {
        match self.next_line() {
            Some(line) => Ok(line),
            None => self.fail("unexpected end of input"),
        }
    }
    /// Parse the document: header, layer blocks, trailer
    fn parse_doc(&mut self) -> GpfResult<GpfDocument> {
        let header = self.parse_header()?;
        let mut layers = Vec::new();
        loop {
            let line = self.expect_line()?;
            if line == "END" {
                break;
            } else if line.starts_with("LAYER ") {
                layers.push(self.parse_layer(&line)?);
            } else {
                return self.fail("expected LAYER or END record");
            }
        }
        let payload = self.parse_payload()?;
        Ok(GpfDocument {
            header,
            layers,
            payload,
        })
    }
    /// Parse the header comment block and `VERSION`/`UNITS` records
    fn parse_header(&mut self) -> GpfResult<GpfHeader> {
        self.ctx.push(GpfContext::Header);
        let line = self.expect_line()?;
        self.assert(
            line == "# Raith Generic Pattern Format (GPF)",
            "missing format banner",
        )?;
        let generator = self.comment_field("# Generated by ")?;
        let exported_at = self.comment_field("# Exported at ")?;
        let exported_at = match NaiveDateTime::parse_from_str(&exported_at, GPF_TIMESTAMP_FMT) {
            Ok(ts) => ts,
            Err(e) => return self.fail(format!("invalid timestamp: {}", e)),
        };
        let source = self.comment_field("# Source: ")?;
        let dbu = self.comment_field("# Original database unit: ")?;
        let dbu = match dbu.strip_suffix("um") {
            Some(num) => num,
            None => return self.fail("database unit must be specified in um"),
        };
        let dbu_um: f64 = self.parse_num(dbu)?;
        let version = self.record_field("VERSION ")?;
        if version != GPF_VERSION {
            return Err(GpfError::Version(version));
        }
        let units = self.record_field("UNITS ")?;
        self.assert(units == GPF_UNITS, "unsupported document units")?;
        self.ctx.pop();
        Ok(GpfHeader {
            generator,
            exported_at,
            source,
            dbu_um,
        })
    }
    /// Parse one `LAYER ... ENDLAYER` block.
    /// `header_line` is the already-consumed `LAYER` record.
    fn parse_layer(&mut self, header_line: &str) -> GpfResult<GpfLayer> {
        self.ctx.push(GpfContext::Layer);
        let mut b = GpfLayerBuilder::default();

        // Split off and un-quote the label, then the three numeric fields
        let (nums, label) = match header_line.split_once(" LABEL ") {
            Some(pair) => pair,
            None => return self.fail("LAYER record missing LABEL"),
        };
        let label = label.trim().trim_matches('"');
        b.label(label);
        let fields: Vec<&str> = nums.split_whitespace().skip(1).collect();
        self.assert(fields.len() == 3, "malformed LAYER record")?;
        b.index(self.parse_num::<usize>(fields[0])?);
        b.layernum(self.parse_num::<i16>(fields[1])?);
        b.datatype(self.parse_num::<i16>(fields[2])?);

        let mut polys = Vec::new();
        loop {
            let line = self.expect_line()?;
            if line == "ENDLAYER" {
                break;
            } else if let Some(dose) = line.strip_prefix("DOSE ") {
                self.ctx.push(GpfContext::Dose);
                b.dose(self.parse_num::<f64>(dose)?);
                self.ctx.pop();
            } else if line.starts_with("POLY ") {
                polys.push(self.parse_poly(&line)?);
            } else {
                return self.fail("expected DOSE, POLY, or ENDLAYER record");
            }
        }
        b.polys(polys);
        self.ctx.pop();
        b.build().map_err(|e| self.err(e.to_string()))
    }
    /// Parse one `POLY` record
    fn parse_poly(&mut self, line: &str) -> GpfResult<GpfPoly> {
        self.ctx.push(GpfContext::Poly);
        let mut tokens = line.split_whitespace().skip(1);
        let count: usize = match tokens.next() {
            Some(tok) => self.parse_num(tok)?,
            None => return self.fail("POLY record missing vertex count"),
        };
        self.assert(
            (3..=4).contains(&count),
            "POLY vertex count must be 3 or 4",
        )?;
        let coords = tokens
            .map(|tok| self.parse_num::<f64>(tok))
            .collect::<GpfResult<Vec<f64>>>()?;
        self.assert(
            coords.len() == 2 * count,
            "POLY coordinate count does not match vertex count",
        )?;
        let points = coords
            .chunks_exact(2)
            .map(|xy| GpfPoint::new(xy[0], xy[1]))
            .collect();
        self.ctx.pop();
        Ok(GpfPoly { points })
    }
    /// Parse the trailer marker and base64 payload
    fn parse_payload(&mut self) -> GpfResult<GpfPayload> {
        self.ctx.push(GpfContext::Trailer);
        let line = self.expect_line()?;
        self.assert(line == GPF_PAYLOAD_MARKER, "missing payload marker")?;
        self.ctx.push(GpfContext::Payload);
        // An empty payload encodes as an empty line
        let encoded = self.next_line().unwrap_or_default();
        let payload = GpfPayload::decode(&encoded)?;
        self.ctx.pop();
        self.ctx.pop();
        Ok(payload)
    }
    /// Read the next line and strip required comment-prefix `prefix`
    fn comment_field(&mut self, prefix: &str) -> GpfResult<String> {
        let line = self.expect_line()?;
        match line.strip_prefix(prefix) {
            Some(rest) => Ok(rest.to_string()),
            None => self.fail(format!("expected `{}` header line", prefix.trim())),
        }
    }
    /// Read the next line and strip required record-prefix `prefix`
    fn record_field(&mut self, prefix: &str) -> GpfResult<String> {
        let line = self.expect_line()?;
        match line.strip_prefix(prefix) {
            Some(rest) => Ok(rest.to_string()),
            None => self.fail(format!("expected `{}` record", prefix.trim())),
        }
    }
    /// Parse numeric token `tok`, failing with parser-context on error
    fn parse_num<T: FromStr>(&self, tok: &str) -> GpfResult<T> {
        match tok.trim().parse::<T>() {
            Ok(val) => Ok(val),
            Err(_) => self.fail(format!("invalid numeric field `{}`", tok)),
        }
    }
}
impl ErrorHelper for GpfParser<'_> {
    type Error = GpfError;
    /// Error generation, capturing the parser's position and context
    fn err(&self, msg: impl Into<String>) -> GpfError {
        GpfError::Parse {
            message: msg.into(),
            line: self.line.clone(),
            linenum: self.linenum,
            ctx: self.ctx.clone(),
        }
    }
}
