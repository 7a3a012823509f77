use std::fmt::Write as _;
use std::fs::File;
use std::io::{self, BufWriter, Write as _};
use std::path::Path;

use rental_core::core_api::{CoreError, CoreErrorCode, MergeReport, Session};
use rental_core::dex::ReferenceEntry;
use rental_core::listing::schema::StatField;
use rental_core::listing::types::RentalRecord;
use serde::Serialize;
use serde_json::ser::Formatter;
use serde_json::Value as JsonValue;

const SUMMARY_WIDTH: usize = 72;
const NAME_COL_WIDTH: usize = 14;
const STAT_COL_WIDTH: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonStyle {
    /// Byte layout of Python's `json.dump` defaults: `", "` and `": "`
    /// separators with non-ASCII escaped.
    #[default]
    PythonCompat,
    Compact,
    Pretty,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SummaryOptions {
    /// Also list each rental record with its stats and moves.
    pub records: bool,
}

pub fn render_json(entries: &[ReferenceEntry], style: JsonStyle) -> Result<String, CoreError> {
    let mut buf = Vec::new();
    write_json(&mut buf, entries, style)?;
    String::from_utf8(buf).map_err(|e| {
        CoreError::new(
            CoreErrorCode::Encode,
            format!("rendered JSON is not UTF-8: {e}"),
        )
    })
}

pub fn write_json<W: io::Write>(
    writer: W,
    entries: &[ReferenceEntry],
    style: JsonStyle,
) -> Result<(), CoreError> {
    let result = match style {
        JsonStyle::PythonCompat => {
            let mut ser = serde_json::Serializer::with_formatter(writer, PythonFormatter);
            entries.serialize(&mut ser)
        }
        JsonStyle::Compact => serde_json::to_writer(writer, entries),
        JsonStyle::Pretty => serde_json::to_writer_pretty(writer, entries),
    };
    result.map_err(|e| {
        let code = if e.is_io() {
            CoreErrorCode::Io
        } else {
            CoreErrorCode::Encode
        };
        CoreError::new(code, format!("failed to encode JSON: {e}"))
    })
}

pub fn write_json_file(
    path: &Path,
    entries: &[ReferenceEntry],
    style: JsonStyle,
) -> Result<(), CoreError> {
    let file = File::create(path).map_err(|e| {
        CoreError::new(
            CoreErrorCode::Io,
            format!("cannot create {}: {e}", path.display()),
        )
    })?;
    let mut writer = BufWriter::new(file);
    write_json(&mut writer, entries, style)?;
    writer.flush().map_err(|e| {
        CoreError::new(
            CoreErrorCode::Io,
            format!("cannot write {}: {e}", path.display()),
        )
    })
}

pub fn render_report_json(report: &MergeReport) -> Result<JsonValue, CoreError> {
    serde_json::to_value(report).map_err(|e| {
        CoreError::new(
            CoreErrorCode::Encode,
            format!("failed to encode run report: {e}"),
        )
    })
}

pub fn render_summary(session: &Session, options: SummaryOptions) -> String {
    let report = session.report();
    let mut out = String::new();

    writeln!(&mut out, "{}", centered("RENTAL DEX MERGE", SUMMARY_WIDTH))
        .expect("writing to String cannot fail");
    writeln!(&mut out, "{}", "=".repeat(SUMMARY_WIDTH)).expect("writing to String cannot fail");
    writeln!(
        &mut out,
        "  Rental blocks: {:<8}Records: {:<8}Split: {:<6}Unified: {}",
        report.block_count,
        report.record_count,
        report.split_special_count,
        report.unified_special_count
    )
    .expect("writing to String cannot fail");
    writeln!(
        &mut out,
        "  Dex entries:   {:<8}Merged:  {:<8}Dropped: {}",
        report.reference_count, report.merged_count, report.dropped_reference_count
    )
    .expect("writing to String cannot fail");

    write_name_list(&mut out, "Duplicate rental names", &report.duplicate_names);
    write_name_list(&mut out, "Rentals without dex entry", &report.unmatched_rentals);

    if !report.skipped_blocks.is_empty() {
        writeln!(&mut out).expect("writing to String cannot fail");
        writeln!(&mut out, " ::: Skipped blocks :::").expect("writing to String cannot fail");
        for block in &report.skipped_blocks {
            writeln!(
                &mut out,
                "  #{:<4} line {:<6} {}",
                block.index, block.first_line, block.reason
            )
            .expect("writing to String cannot fail");
        }
    }

    if options.records && !session.table().is_empty() {
        writeln!(&mut out).expect("writing to String cannot fail");
        writeln!(&mut out, " ::: Rental records :::").expect("writing to String cannot fail");
        for record in session.records() {
            out.push_str(&record_card(record));
        }
    }

    out
}

fn write_name_list(out: &mut String, title: &str, names: &[String]) {
    if names.is_empty() {
        return;
    }
    writeln!(out).expect("writing to String cannot fail");
    writeln!(out, " ::: {title} :::").expect("writing to String cannot fail");
    for name in names {
        writeln!(out, "  {name}").expect("writing to String cannot fail");
    }
}

/// Two lines per record: id, name and stats, then the moveset.
pub fn record_card(record: &RentalRecord) -> String {
    let mut line = format!(
        "  #{:03} {:<width$}",
        record.dex_id,
        record.name,
        width = NAME_COL_WIDTH
    );
    for stat in &record.stats {
        let label = stat_label(stat.field);
        line.push_str(&format!(
            " {label}:{:<width$}",
            stat.value,
            width = STAT_COL_WIDTH
        ));
    }

    let mut out = String::new();
    writeln!(&mut out, "{}", line.trim_end()).expect("writing to String cannot fail");
    writeln!(&mut out, "        {}", record.moves.join(" / "))
        .expect("writing to String cannot fail");
    out
}

fn stat_label(field: StatField) -> &'static str {
    match field {
        StatField::Hp => "HP",
        StatField::Attack => "Atk",
        StatField::Defense => "Def",
        StatField::SpecialAttack => "SpAtk",
        StatField::SpecialDefense => "SpDef",
        StatField::Special => "Sp",
        StatField::Speed => "Spd",
    }
}

fn centered(text: &str, width: usize) -> String {
    let len = text.chars().count();
    if len >= width {
        return text.to_string();
    }
    format!("{}{}", " ".repeat((width - len) / 2), text)
}

/// `serde_json` formatter reproducing Python's default `json.dump` output.
#[derive(Debug, Clone, Copy, Default)]
pub struct PythonFormatter;

impl Formatter for PythonFormatter {
    fn begin_array_value<W: ?Sized + io::Write>(
        &mut self,
        writer: &mut W,
        first: bool,
    ) -> io::Result<()> {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_key<W: ?Sized + io::Write>(
        &mut self,
        writer: &mut W,
        first: bool,
    ) -> io::Result<()> {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_value<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        writer.write_all(b": ")
    }

    fn write_f64<W: ?Sized + io::Write>(&mut self, writer: &mut W, value: f64) -> io::Result<()> {
        writer.write_all(python_float_repr(value).as_bytes())
    }

    /// Numbers decoded from the dex keep their source text; floats among them
    /// are re-spelled the way Python prints them after a load.
    fn write_number_str<W: ?Sized + io::Write>(
        &mut self,
        writer: &mut W,
        value: &str,
    ) -> io::Result<()> {
        if !value.contains(['.', 'e', 'E']) {
            let value = if value == "-0" { "0" } else { value };
            return writer.write_all(value.as_bytes());
        }
        match value.parse::<f64>() {
            Ok(parsed) => writer.write_all(python_float_repr(parsed).as_bytes()),
            Err(_) => writer.write_all(value.as_bytes()),
        }
    }

    fn write_string_fragment<W: ?Sized + io::Write>(
        &mut self,
        writer: &mut W,
        fragment: &str,
    ) -> io::Result<()> {
        let mut start = 0;
        for (pos, ch) in fragment.char_indices() {
            if ch.is_ascii() && ch != '\u{7f}' {
                continue;
            }
            writer.write_all(fragment[start..pos].as_bytes())?;
            let mut units = [0u16; 2];
            for unit in ch.encode_utf16(&mut units) {
                write!(writer, "\\u{:04x}", unit)?;
            }
            start = pos + ch.len_utf8();
        }
        writer.write_all(fragment[start..].as_bytes())
    }
}

/// Python's float `repr`: shortest round-trip digits, positional between
/// 1e-4 and 1e16, otherwise `d.ddde+XX`.
fn python_float_repr(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        let text = if value > 0.0 { "Infinity" } else { "-Infinity" };
        return text.to_string();
    }

    let sign = if value.is_sign_negative() { "-" } else { "" };
    let shortest = format!("{:e}", value.abs());
    let (mantissa, exponent) = shortest.split_once('e').unwrap_or((shortest.as_str(), "0"));
    let exponent: i32 = exponent.parse().unwrap_or(0);
    let digits: String = mantissa.chars().filter(|c| *c != '.').collect();
    // Position of the decimal point relative to the first digit.
    let point = exponent + 1;

    let body = if !(-3..=16).contains(&point) {
        let (lead, rest) = digits.split_at(1);
        let exp_sign = if exponent < 0 { '-' } else { '+' };
        if rest.is_empty() {
            format!("{lead}e{exp_sign}{:02}", exponent.abs())
        } else {
            format!("{lead}.{rest}e{exp_sign}{:02}", exponent.abs())
        }
    } else if point <= 0 {
        format!("0.{}{digits}", "0".repeat(point.unsigned_abs() as usize))
    } else {
        let point = point as usize;
        if point >= digits.len() {
            format!("{digits}{}.0", "0".repeat(point - digits.len()))
        } else {
            format!("{}.{}", &digits[..point], &digits[point..])
        }
    };
    format!("{sign}{body}")
}
