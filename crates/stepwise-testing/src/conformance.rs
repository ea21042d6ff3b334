//! Driver conformance suite
//!
//! Runs every navigation and read operation of a [`Driver`] over the
//! standard fixture layout and reports the first deviation.

use std::fmt::Debug;

use stepwise_source::{Direction, Driver, MigrationReader, SourceResult, VfsSource};
use stepwise_vfs::FileSystem;

use crate::fixtures::{self, STANDARD_IDENTIFIER, STANDARD_ROOT};
use crate::{assertion, TestResult};

/// What the standard layout answers for one queried version
#[derive(Debug, Clone, Copy)]
pub struct Expectation {
    pub version: u64,
    pub prev: Option<u64>,
    pub next: Option<u64>,
    pub up: bool,
    pub down: bool,
}

const fn expect(
    version: u64,
    prev: Option<u64>,
    next: Option<u64>,
    up: bool,
    down: bool,
) -> Expectation {
    Expectation {
        version,
        prev,
        next,
        up,
        down,
    }
}

/// Expected answers over the standard layout, including absent versions
pub const STANDARD_EXPECTATIONS: &[Expectation] = &[
    expect(0, None, Some(1), false, false),
    expect(1, None, Some(3), true, true),
    expect(2, Some(1), Some(3), false, false),
    expect(3, Some(1), Some(4), true, false),
    expect(4, Some(3), Some(5), true, true),
    expect(5, Some(4), Some(7), false, true),
    expect(6, Some(5), Some(7), false, false),
    expect(7, Some(5), None, true, true),
    expect(8, Some(7), None, false, false),
];

/// Smallest version of the standard layout
pub const STANDARD_FIRST: u64 = 1;

/// Check a driver serving the standard layout
pub fn run(driver: &dyn Driver) -> TestResult<()> {
    check_navigation("first", STANDARD_FIRST, driver.first(), Some(STANDARD_FIRST))?;

    for expectation in STANDARD_EXPECTATIONS {
        let version = expectation.version;
        tracing::debug!(version, "checking driver conformance");

        check_navigation("prev", version, driver.prev(version), expectation.prev)?;
        check_navigation("next", version, driver.next(version), expectation.next)?;
        check_read(version, Direction::Up, driver.read_up(version), expectation.up)?;
        check_read(version, Direction::Down, driver.read_down(version), expectation.down)?;
    }

    Ok(())
}

/// Bind a [`VfsSource`] to `fs` at the standard root and check it
pub fn run_on<F: FileSystem>(fs: F) -> TestResult<()> {
    let source = VfsSource::with_instance(fs, STANDARD_ROOT)?;
    run(&source)?;
    source.close()?;
    Ok(())
}

fn check_navigation(
    op: &str,
    version: u64,
    result: SourceResult<u64>,
    expected: Option<u64>,
) -> TestResult<()> {
    match (result, expected) {
        (Ok(got), Some(want)) if got == want => Ok(()),
        (Err(err), None) if err.is_not_found() => Ok(()),
        (Err(err), _) if !err.is_not_found() => Err(err.into()),
        (got, want) => Err(mismatch(op, version, &want, &got)),
    }
}

fn check_read(
    version: u64,
    direction: Direction,
    result: SourceResult<MigrationReader>,
    expected: bool,
) -> TestResult<()> {
    let op = format!("read_{}", direction);
    match (result, expected) {
        (Ok(reader), true) => {
            if reader.identifier() != STANDARD_IDENTIFIER {
                return Err(mismatch(&op, version, &STANDARD_IDENTIFIER, &reader.identifier()));
            }
            let body = reader.into_string()?;
            let want = fixtures::body(version, direction);
            if body != want {
                return Err(mismatch(&op, version, &want, &body));
            }
            Ok(())
        }
        (Err(err), false) if err.is_not_found() => Ok(()),
        (Err(err), _) if !err.is_not_found() => Err(err.into()),
        (got, want) => {
            let got = got.map(|reader| reader.identifier().to_string());
            Err(mismatch(&op, version, &want, &got))
        }
    }
}

fn mismatch(op: &str, version: u64, want: &dyn Debug, got: &dyn Debug) -> crate::TestError {
    assertion(format!("{}({}): expected {:?}, got {:?}", op, version, want, got))
}
