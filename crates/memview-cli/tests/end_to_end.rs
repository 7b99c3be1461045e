//! End-to-end tests against the `memview-target` helper process.

#![cfg(any(target_os = "linux", target_os = "windows"))]

use std::io::{BufRead, BufReader, Write};
use std::process::{Child, Command, Stdio};

use memview_core::{
    ErrorKind, ProcessMemoryView, ReadMemory, Value, ValueKind, ValueReport, parse_reports,
};

const PROMPT: &str = "Press ENTER to quit...";

/// Running `memview-target`; told to exit on drop.
struct TargetProcess {
    child: Child,
    lines: Vec<String>,
}

impl TargetProcess {
    fn spawn() -> Self {
        let mut child = Command::new(env!("CARGO_BIN_EXE_memview-target"))
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .spawn()
            .expect("failed to spawn memview-target");

        let stdout = child.stdout.take().expect("stdout is piped");
        let mut reader = BufReader::new(stdout);
        let mut lines = Vec::new();
        loop {
            let mut line = String::new();
            let n = reader.read_line(&mut line).expect("failed to read target output");
            assert!(n > 0, "target exited before prompting");
            if line.trim_end() == PROMPT {
                break;
            }
            lines.push(line.trim_end().to_string());
        }

        Self { child, lines }
    }

    fn pid(&self) -> u32 {
        self.child.id()
    }

    fn reports(&self) -> Vec<ValueReport> {
        parse_reports(self.lines.iter().map(String::as_str))
    }

    fn report(&self, kind: ValueKind) -> ValueReport {
        self.reports()
            .into_iter()
            .find(|r| r.kind() == kind)
            .unwrap_or_else(|| panic!("no {kind} report in {:?}", self.lines))
    }

    #[cfg(target_os = "linux")]
    fn guard_address(&self) -> u64 {
        let line = self
            .lines
            .iter()
            .find(|l| l.starts_with("guard:"))
            .expect("no guard line");
        let (_, address) = line.rsplit_once(" at ").expect("guard line has an address");
        memview_core::parse_address(address).unwrap()
    }
}

impl Drop for TargetProcess {
    fn drop(&mut self) {
        if let Some(mut stdin) = self.child.stdin.take() {
            let _ = stdin.write_all(b"\n");
            let _ = stdin.flush();
        }
        let _ = self.child.wait();
    }
}

#[test]
fn test_every_report_reads_back() {
    let target = TargetProcess::spawn();
    let reports = target.reports();
    assert_eq!(reports.len(), 8, "unexpected output: {:?}", target.lines);

    let mut view = ProcessMemoryView::open(target.pid()).unwrap();
    for report in &reports {
        assert_eq!(report.read_back(&view).unwrap(), report.value, "{report}");
    }
    view.close().unwrap();
}

#[test]
fn test_read_int() {
    let target = TargetProcess::spawn();
    let report = target.report(ValueKind::Int);

    let mut view = ProcessMemoryView::open(target.pid()).unwrap();
    assert_eq!(view.read_i32(report.address).unwrap(), -988324);
    view.close().unwrap();
}

#[test]
fn test_read_unsigned_short_is_not_negative() {
    let target = TargetProcess::spawn();
    let report = target.report(ValueKind::UnsignedShort);

    let mut view = ProcessMemoryView::open(target.pid()).unwrap();
    assert_eq!(view.read_u16(report.address).unwrap(), 54310);
    // Same bits as a signed short.
    assert_eq!(view.read_i16(report.address).unwrap(), 54310u16 as i16);
    view.close().unwrap();
}

#[test]
fn test_read_floats() {
    let target = TargetProcess::spawn();
    let float = target.report(ValueKind::Float);
    let double = target.report(ValueKind::Double);

    let mut view = ProcessMemoryView::open(target.pid()).unwrap();
    assert_eq!(view.read_f32(float.address).unwrap(), 28.75);
    assert_eq!(view.read_f64(double.address).unwrap(), -4.125);
    view.close().unwrap();
}

#[test]
fn test_read_bytes() {
    let target = TargetProcess::spawn();
    let report = target.report(ValueKind::Bytes);
    let Value::Bytes(expected) = &report.value else {
        panic!("bytes report holds {:?}", report.value);
    };

    let mut view = ProcessMemoryView::open(target.pid()).unwrap();
    assert_eq!(&view.read_bytes(report.address, expected.len()).unwrap(), expected);
    assert_eq!(view.read_bytes(report.address, 4).unwrap(), vec![11, 22, 33, 44]);
    view.close().unwrap();
}

#[test]
fn test_double_close() {
    let target = TargetProcess::spawn();

    let mut view = ProcessMemoryView::open(target.pid()).unwrap();
    view.close().unwrap();
    let err = view.close().unwrap_err();
    assert_eq!(err.kind(), ErrorKind::HandleClose);

    // Same after a scoped release.
    let mut view = ProcessMemoryView::open(target.pid()).unwrap();
    {
        let scoped = view.scoped();
        assert_eq!(scoped.pid(), target.pid());
    }
    let second = view.close().unwrap_err();
    assert_eq!(second.to_string(), err.to_string());
}

#[test]
fn test_read_after_close() {
    let target = TargetProcess::spawn();
    let report = target.report(ValueKind::Int);

    let mut view = ProcessMemoryView::open(target.pid()).unwrap();
    view.close().unwrap();

    let err = view.read_i32(report.address).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MemoryRead);
}

#[cfg(target_os = "linux")]
#[test]
fn test_read_into_unmapped_page_is_incomplete() {
    let target = TargetProcess::spawn();
    let tail = target.guard_address();

    let mut view = ProcessMemoryView::open(target.pid()).unwrap();
    let err = view.read_bytes(tail, 16).unwrap_err();
    assert!(err.is_incomplete_read(), "unexpected error: {err}");
    assert_eq!(err.to_string(), "Memory read incomplete");
    assert_eq!(view.read_bytes(tail, 8).unwrap(), vec![0; 8]);
    view.close().unwrap();
}
