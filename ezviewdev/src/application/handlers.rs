use std::io::Write;
use std::path::{Path, PathBuf};

use ezview_core::error::{EzError, Result};
use ezview_core::read::check::check_paths;
use ezview_core::{
    CaptureFile, DisplayClock, FileHeader, FileTime, TickUnit, derive_timestamp_with,
    write_capture,
};
use time::Duration;
use time::format_description::well_known::Rfc3339;
use walkdir::WalkDir;

use crate::presentation::cli::TickArg;

fn resolve_unit(arg: TickArg, header: &FileHeader) -> Option<TickUnit> {
    match arg {
        TickArg::Auto => header.device_type.tick_unit(),
        TickArg::TenthMs => Some(TickUnit::TenthMillis),
        TickArg::Us => Some(TickUnit::Micros),
    }
}

fn fmt_filetime(ft: FileTime) -> Result<String> {
    if ft.is_unset() {
        return Ok("unset".to_string());
    }
    ft.to_datetime()?
        .format(&Rfc3339)
        .map_err(|e| EzError::Format(format!("timestamp format: {e}")))
}

fn fmt_duration(d: Duration) -> String {
    let sign = if d.is_negative() { "-" } else { "" };
    let d = d.abs();
    format!("{sign}{}.{:06}", d.whole_seconds(), d.subsec_microseconds())
}

fn unit_label(unit: Option<TickUnit>) -> &'static str {
    match unit {
        Some(TickUnit::TenthMillis) => "0.1 ms",
        Some(TickUnit::Micros) => "1 us",
        None => "unknown (raw ticks)",
    }
}

fn write_info(out: &mut impl Write, path: &Path, f: &CaptureFile, tick: TickArg) -> Result<()> {
    let h = f.header();
    let unit = resolve_unit(tick, h);
    let stats = f.stats();

    writeln!(out, "file:          {}", path.display())?;
    writeln!(
        out,
        "version:       {}  (header {} bytes, record {} bytes)",
        h.version, h.header_size, h.record_size
    )?;
    writeln!(
        out,
        "device:        {} ({})",
        h.device_type.name(),
        u32::from(h.device_type)
    )?;
    writeln!(out, "tick unit:     {}", unit_label(unit))?;
    writeln!(out, "capture start: {}", fmt_filetime(h.capture_start)?)?;
    writeln!(out, "first record:  {}", fmt_filetime(h.first_record)?)?;
    writeln!(out, "records:       {}", stats.records)?;
    for (event, n) in &stats.per_event {
        writeln!(out, "  {:<10} {n}", format!("{}({})", event.label(), event.code()))?;
    }
    if let (Some(span), Some(unit)) = (stats.span_ticks(), unit) {
        writeln!(out, "span:          {} s", fmt_duration(unit.to_duration(span)))?;
    }
    if stats.is_monotonic() {
        writeln!(out, "ordering:      monotonic")?;
    } else {
        writeln!(out, "ordering:      {} regressions", stats.regressions)?;
    }
    Ok(())
}

pub fn handle_info(capture: PathBuf, tick_unit: TickArg) -> Result<()> {
    let f = CaptureFile::open(&capture)?;
    let mut out = std::io::stdout().lock();
    write_info(&mut out, &capture, &f, tick_unit)
}

struct DumpOptions {
    start: usize,
    limit: Option<usize>,
    tick: TickArg,
    absolute: bool,
    raw: bool,
}

fn write_dump(out: &mut impl Write, f: &CaptureFile, opts: &DumpOptions) -> Result<()> {
    let h = f.header();
    let records = f.records();
    let unit = resolve_unit(opts.tick, h);
    if unit.is_none() {
        tracing::warn!(
            device = u32::from(h.device_type),
            "unknown device type; printing raw ticks (use --tick-unit to override)"
        );
    }
    let clock = unit.map(|u| DisplayClock::new(h, records.first().as_ref(), u));

    let end = match opts.limit {
        Some(n) => opts.start.saturating_add(n).min(records.len()),
        None => records.len(),
    };
    for i in opts.start..end {
        let Some(r) = records.get(i) else { break };
        let when = match (unit, clock) {
            (Some(u), _) if opts.absolute => fmt_filetime(derive_timestamp_with(h, &r, u)?)?,
            (_, Some(c)) => fmt_duration(c.relative(&r)),
            _ => format!("{}", r.elapsed_ticks()),
        };
        write!(out, "{i:>7}  {when:>16}  {r}")?;
        if opts.raw {
            if let Some(b) = records.raw(i) {
                write!(out, "  [{}]", hex::encode(b))?;
            }
        }
        writeln!(out)?;
    }
    Ok(())
}

pub fn handle_dump(
    capture: PathBuf,
    start: usize,
    limit: Option<usize>,
    tick_unit: TickArg,
    absolute: bool,
    raw: bool,
) -> Result<()> {
    let f = CaptureFile::open(&capture)?;
    let opts = DumpOptions {
        start,
        limit,
        tick: tick_unit,
        absolute,
        raw,
    };
    let mut out = std::io::stdout().lock();
    write_dump(&mut out, &f, &opts)
}

fn is_capture(p: &Path) -> bool {
    p.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("dat"))
}

fn collect_targets(paths: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for root in paths {
        if root.is_dir() {
            let mut found = Vec::new();
            for e in WalkDir::new(root).follow_links(false) {
                let e = e.map_err(std::io::Error::other)?;
                if e.file_type().is_file() && is_capture(e.path()) {
                    found.push(e.path().to_path_buf());
                }
            }
            found.sort();
            files.extend(found);
        } else {
            files.push(root.clone());
        }
    }
    Ok(files)
}

fn write_verify(out: &mut impl Write, paths: &[PathBuf]) -> Result<()> {
    let targets = collect_targets(paths)?;
    if targets.is_empty() {
        return Err(EzError::Format("no capture files found".to_string()));
    }
    let reports = check_paths(&targets);
    let mut failed = 0usize;
    for r in &reports {
        match &r.outcome {
            Ok(s) => writeln!(
                out,
                "OK    {}  ({} records, {})",
                r.path.display(),
                s.stats.records,
                s.header.device_type.name()
            )?,
            Err(e) => {
                failed += 1;
                writeln!(out, "FAIL  {}: {e}", r.path.display())?;
            }
        }
    }
    if failed > 0 {
        return Err(EzError::Format(format!(
            "{failed} of {} captures failed validation",
            reports.len()
        )));
    }
    Ok(())
}

pub fn handle_verify(paths: Vec<PathBuf>) -> Result<()> {
    let mut out = std::io::stdout().lock();
    write_verify(&mut out, &paths)?;
    eprintln!("verify: OK");
    Ok(())
}

pub fn handle_rewrite(input: PathBuf, output: PathBuf) -> Result<()> {
    let f = CaptureFile::open(&input)?;
    let records = f.records().to_vec();
    write_capture(&output, f.header(), &records)?;
    eprintln!("rewrite: {} records -> {}", records.len(), output.display());
    Ok(())
}
