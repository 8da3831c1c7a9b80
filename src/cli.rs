use crate::config::POWER_SUPPLY_DIR_ENV;
use clap::{CommandFactory, Parser};
use std::ffi::OsString;
use std::io::{self, Write};

/// Arguments are taken verbatim. `-v` is not parsed here; it travels with the
/// battery names and is split off by [`crate::report::Selection::from_args`].
#[derive(Parser, Debug)]
#[command(
    name = "bats",
    about = "Print aggregate battery percentage followed by each battery's status",
    disable_help_flag = true,
    disable_version_flag = true
)]
pub struct Cli {
    /// Batteries to include (e.g., BAT0). Defaults to every BAT* supply.
    /// `-v` anywhere prints a `verbose` line first.
    #[arg(value_name = "BATTERY", allow_hyphen_values = true, trailing_var_arg = true)]
    pub args: Vec<OsString>,
}

/// Write the bats(1) man page: clap's generated sections plus output format,
/// environment and exit status.
pub fn render_manpage(out: &mut dyn Write) -> io::Result<()> {
    clap_mangen::Man::new(Cli::command()).render(out)?;
    write!(
        out,
        r#".SH OUTPUT
One line: the summed \fBnow\fR over summed \fBfull\fR as a whole percentage,
immediately followed by the first byte of each battery's \fBstatus\fR
in name order, e.g. \fB75DF\fR. With \fB-v\fR a line \fBverbose\fR comes first.
.SH ENVIRONMENT
.TP
\fB{env}\fR
Power supply directory to read instead of /sys/class/power_supply.
.TP
\fBRUST_LOG\fR
Diagnostic log filter; diagnostics go to stderr.
.SH "EXIT STATUS"
0 on success, 1 if any battery cannot be listed, read or parsed, or if the
total full capacity is zero.
"#,
        env = POWER_SUPPLY_DIR_ENV
    )
}
