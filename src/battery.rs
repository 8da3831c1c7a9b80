use crate::error::{Error, Result};
use crate::sysfs::PowerSupplyDir;
use std::collections::BTreeSet;
use std::ffi::{OsStr, OsString};
use std::os::unix::ffi::OsStrExt;

/// All supplies whose name starts with `prefix`. The match is on raw name
/// bytes (case-sensitive, no UTF-8 requirement). The set iterates bytewise.
pub fn discover(ps: &PowerSupplyDir, prefix: &str) -> Result<BTreeSet<OsString>> {
    let batteries: BTreeSet<OsString> = ps
        .list_entries()?
        .into_iter()
        .filter(|name| name.as_bytes().starts_with(prefix.as_bytes()))
        .collect();
    tracing::debug!(dir = %ps.dir().display(), ?batteries, "discovered batteries");
    Ok(batteries)
}

/// Read a logical attribute such as `full` or `now` that the driver exposes
/// as either `charge_<name>` or `energy_<name>`.
///
/// Prefixes are tried in order and the first readable file wins. A missing
/// prefixed file is the expected case for the other scheme and is not
/// reported on its own.
pub fn read_scheme_attribute(
    ps: &PowerSupplyDir,
    prefixes: &[String],
    battery: &OsStr,
    attribute: &str,
) -> Result<String> {
    let name = battery.to_string_lossy();
    prefixes
        .iter()
        .find_map(|prefix| {
            let file = format!("{}{}", prefix, attribute);
            match ps.read_attribute(battery, &file, None) {
                Ok(value) => {
                    tracing::debug!(battery = %name, file = %file, "resolved attribute");
                    Some(String::from_utf8_lossy(&value).into_owned())
                }
                Err(e) => {
                    tracing::trace!(battery = %name, file = %file, error = %e, "scheme not available");
                    None
                }
            }
        })
        .ok_or_else(|| Error::UnresolvedAttribute {
            battery: name.to_string(),
            attribute: attribute.to_string(),
        })
}

/// [`read_scheme_attribute`] parsed as an integer.
pub fn read_scheme_attribute_int(
    ps: &PowerSupplyDir,
    prefixes: &[String],
    battery: &OsStr,
    attribute: &str,
) -> Result<i64> {
    parse_int(&read_scheme_attribute(ps, prefixes, battery, attribute)?)
}

/// Parse a base-10 signed integer after dropping trailing newlines.
/// Leading or interior whitespace is an error.
pub fn parse_int(raw: &str) -> Result<i64> {
    raw.trim_end_matches('\n')
        .parse()
        .map_err(|_| Error::Parse {
            raw: raw.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    fn prefixes() -> Vec<String> {
        vec!["charge_".to_string(), "energy_".to_string()]
    }

    fn write(root: &Path, supply: &str, file: &str, content: &str) {
        let dir = root.join(supply);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join(file), content).unwrap();
    }

    #[test]
    fn test_parse_int() {
        assert_eq!(parse_int("87\n").unwrap(), 87);
        assert_eq!(parse_int("87\n\n\n").unwrap(), 87);
        assert_eq!(parse_int("87").unwrap(), 87);
        assert_eq!(parse_int("-12\n").unwrap(), -12);
    }

    #[test]
    fn test_parse_int_rejects() {
        for raw in ["\n87", " 87\n", "8 7", "", "\n", "   \n", "abc\n", "87\r\n"] {
            match parse_int(raw) {
                Err(Error::Parse { raw: r }) => assert_eq!(r, raw),
                other => panic!("{:?} should not parse, got {:?}", raw, other),
            }
        }
    }

    #[test]
    fn test_charge_preferred_over_energy() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "BAT0", "charge_full", "4000\n");
        write(tmp.path(), "BAT0", "energy_full", "9000\n");
        let ps = PowerSupplyDir::new(tmp.path());

        assert_eq!(
            read_scheme_attribute_int(&ps, &prefixes(), OsStr::new("BAT0"), "full").unwrap(),
            4000
        );
    }

    #[test]
    fn test_energy_fallback() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "BAT0", "energy_now", "52000000\n");
        let ps = PowerSupplyDir::new(tmp.path());

        assert_eq!(
            read_scheme_attribute(&ps, &prefixes(), OsStr::new("BAT0"), "now").unwrap(),
            "52000000\n"
        );
    }

    #[test]
    fn test_unresolved_names_battery_and_attribute() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "BAT0", "status", "Full\n");
        let ps = PowerSupplyDir::new(tmp.path());

        let err = read_scheme_attribute(&ps, &prefixes(), OsStr::new("BAT0"), "full").unwrap_err();
        match &err {
            Error::UnresolvedAttribute { battery, attribute } => {
                assert_eq!(battery, "BAT0");
                assert_eq!(attribute, "full");
            }
            other => panic!("unexpected error {:?}", other),
        }
        assert_eq!(
            err.to_string(),
            "neither energy nor charge prefix exists for BAT0/full"
        );
    }

    #[test]
    fn test_resolved_but_garbage() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "BAT0", "charge_full", "unknown\n");
        write(tmp.path(), "BAT0", "energy_full", "5000\n");
        let ps = PowerSupplyDir::new(tmp.path());

        // The first readable scheme wins even if its content is bad.
        assert!(matches!(
            read_scheme_attribute_int(&ps, &prefixes(), OsStr::new("BAT0"), "full"),
            Err(Error::Parse { .. })
        ));
    }

    #[test]
    fn test_discover_prefix_match() {
        let tmp = TempDir::new().unwrap();
        for name in ["BAT0", "BAT1", "BATTERY_X", "AC", "bat0", "ucsi-source-psy-1"] {
            fs::create_dir_all(tmp.path().join(name)).unwrap();
        }
        let ps = PowerSupplyDir::new(tmp.path());

        let found: Vec<OsString> = discover(&ps, "BAT").unwrap().into_iter().collect();
        assert_eq!(found, vec!["BAT0", "BAT1", "BATTERY_X"]);
    }

    #[test]
    fn test_discover_non_utf8_name() {
        let tmp = TempDir::new().unwrap();
        let odd = OsStr::from_bytes(b"BAT\xff");
        let not_battery = OsStr::from_bytes(b"AC\xff");
        for name in [OsStr::new("BAT0"), odd, not_battery] {
            fs::create_dir_all(tmp.path().join(name)).unwrap();
        }
        let ps = PowerSupplyDir::new(tmp.path());

        let found: Vec<OsString> = discover(&ps, "BAT").unwrap().into_iter().collect();
        assert_eq!(found, vec![OsString::from("BAT0"), odd.to_os_string()]);
    }

    #[test]
    fn test_unresolved_non_utf8_battery() {
        let tmp = TempDir::new().unwrap();
        let ps = PowerSupplyDir::new(tmp.path());

        match read_scheme_attribute(&ps, &prefixes(), OsStr::from_bytes(b"BAT\xff"), "now") {
            Err(Error::UnresolvedAttribute { battery, .. }) => assert_eq!(battery, "BAT\u{fffd}"),
            other => panic!("unexpected result {:?}", other),
        }
    }

    #[test]
    fn test_discover_none() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir_all(tmp.path().join("AC")).unwrap();
        let ps = PowerSupplyDir::new(tmp.path());

        assert!(discover(&ps, "BAT").unwrap().is_empty());
    }

    #[test]
    fn test_discover_missing_dir() {
        let tmp = TempDir::new().unwrap();
        let ps = PowerSupplyDir::new(tmp.path().join("nope"));

        assert!(matches!(
            discover(&ps, "BAT"),
            Err(Error::Enumeration { .. })
        ));
    }
}
