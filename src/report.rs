use crate::battery;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::sysfs::PowerSupplyDir;
use std::collections::BTreeSet;
use std::ffi::{OsStr, OsString};
use std::fmt;

/// Line printed ahead of the summary in verbose mode.
pub const VERBOSE_LINE: &str = "verbose";

/// Which batteries to report on, and whether to be verbose about it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    pub batteries: BTreeSet<OsString>,
    pub verbose: bool,
}

impl Selection {
    /// Split raw arguments into battery names and the verbose flag.
    /// The flag may appear anywhere, any number of times. Duplicate names collapse.
    pub fn from_args<I, S>(args: I, verbose_flag: &str) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        let mut batteries: BTreeSet<OsString> = args.into_iter().map(Into::into).collect();
        let verbose = batteries.remove(OsStr::new(verbose_flag));
        Self { batteries, verbose }
    }

    /// Fill an empty selection with every battery the system exposes.
    pub fn resolve(mut self, ps: &PowerSupplyDir, config: &Config) -> Result<Self> {
        if self.batteries.is_empty() {
            self.batteries = battery::discover(ps, &config.battery_prefix)?;
        }
        Ok(self)
    }
}

/// Raw values read for one battery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reading {
    pub name: OsString,
    /// Status bytes exactly as read, not decoded.
    pub status: Vec<u8>,
    pub full: i64,
    pub now: i64,
}

impl Reading {
    /// Read status, then `full`, then `now`. Any failure aborts.
    pub fn read(ps: &PowerSupplyDir, config: &Config, name: &OsStr) -> Result<Self> {
        let status = ps.read_attribute(name, "status", Some(config.status_len))?;
        let full = battery::read_scheme_attribute_int(ps, &config.charge_prefixes, name, "full")?;
        let now = battery::read_scheme_attribute_int(ps, &config.charge_prefixes, name, "now")?;
        let reading = Self {
            name: name.to_os_string(),
            status,
            full,
            now,
        };
        tracing::debug!(
            battery = %reading.name.to_string_lossy(),
            status = %String::from_utf8_lossy(&reading.status),
            full,
            now,
            "read battery"
        );
        Ok(reading)
    }
}

/// Totals across the selected batteries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Totals {
    pub batteries: usize,
    pub full: i64,
    pub now: i64,
    pub status: Vec<u8>,
}

impl Totals {
    /// Fold one reading in. Totals that leave the `i64` range are an error.
    pub fn add(&mut self, reading: &Reading) -> Result<()> {
        let overflow = || Error::TotalsOverflow {
            battery: reading.name.to_string_lossy().into_owned(),
        };
        let full = self.full.checked_add(reading.full).ok_or_else(overflow)?;
        let now = self.now.checked_add(reading.now).ok_or_else(overflow)?;
        self.full = full;
        self.now = now;
        self.batteries += 1;
        self.status.extend_from_slice(&reading.status);
        Ok(())
    }

    /// `now * 100 / full`, truncated.
    pub fn percentage(&self) -> Result<i64> {
        if self.batteries == 0 {
            return Err(Error::NoBatteries);
        }
        if self.full == 0 {
            return Err(Error::ZeroCapacity {
                batteries: self.batteries,
            });
        }
        // i64 * 100 always fits in i128.
        let percent = i128::from(self.now) * 100 / i128::from(self.full);
        i64::try_from(percent).map_err(|_| Error::PercentageOverflow {
            now: self.now,
            full: self.full,
        })
    }
}

/// Read every battery in order and sum them up.
pub fn collect<'a>(
    ps: &PowerSupplyDir,
    config: &Config,
    batteries: impl IntoIterator<Item = &'a OsString>,
) -> Result<Totals> {
    let mut totals = Totals::default();
    for name in batteries {
        totals.add(&Reading::read(ps, config, name)?)?;
    }
    tracing::debug!(
        batteries = totals.batteries,
        full = totals.full,
        now = totals.now,
        "totals"
    );
    Ok(totals)
}

/// What gets printed: percentage immediately followed by the status bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary {
    pub verbose: bool,
    pub percentage: i64,
    pub status: Vec<u8>,
}

impl Summary {
    /// Output exactly as written to stdout, status bytes untouched.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::new();
        if self.verbose {
            out.extend_from_slice(VERBOSE_LINE.as_bytes());
            out.push(b'\n');
        }
        out.extend_from_slice(self.percentage.to_string().as_bytes());
        out.extend_from_slice(&self.status);
        out
    }
}

/// Lossy rendering of [`Summary::to_bytes`], for logs and tests.
impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&String::from_utf8_lossy(&self.to_bytes()))
    }
}

/// Full flow: resolve the selection, read every battery, compute the summary.
pub fn summarize(ps: &PowerSupplyDir, config: &Config, selection: Selection) -> Result<Summary> {
    let selection = selection.resolve(ps, config)?;
    let totals = collect(ps, config, &selection.batteries)?;
    Ok(Summary {
        verbose: selection.verbose,
        percentage: totals.percentage()?,
        status: totals.status,
    })
}
