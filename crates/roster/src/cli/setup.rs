use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use rosterapp::config::RosterConfig;
use rosterapp::error::Result;
use rosterapp::filter::{Choice, Criteria};
use rosterapp::model::{Status, StudentForm};
use rosterapp::reports::{ReportKind, ReportParams};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "roster",
    bin_name = "roster",
    version,
    disable_help_subcommand = true,
    after_help = "Report kinds: by-programme, by-level, gpa-distribution, status, date-range,\n              programme-stats, level-stats, gpa-ranges"
)]
#[command(about = "Manage a roster of student records", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Config file (defaults to ./roster.toml when present)
    #[arg(long, global = true, value_name = "PATH", help_heading = "Options")]
    pub config: Option<PathBuf>,

    /// Start from an empty roster instead of the sample students
    #[arg(long, global = true, help_heading = "Options")]
    pub no_sample: bool,

    /// Import a CSV file before running the command (repeatable)
    #[arg(long, global = true, value_name = "CSV", help_heading = "Options")]
    pub load: Vec<PathBuf>,

    /// Export the roster to CSV after the command
    #[arg(long, global = true, value_name = "CSV", help_heading = "Options")]
    pub save: Option<PathBuf>,

    /// Print results as JSON
    #[arg(long, global = true, help_heading = "Options")]
    pub json: bool,

    /// Verbose output
    #[arg(short, long, global = true, help_heading = "Options")]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List students, optionally filtered
    #[command(alias = "ls", display_order = 1)]
    List(ListArgs),

    /// Show one student
    #[command(display_order = 2)]
    Show { id: String },

    /// Add a student
    #[command(display_order = 3)]
    Add(AddArgs),

    /// Change a student's attributes (unspecified ones are kept)
    #[command(display_order = 4)]
    Update {
        id: String,

        #[command(flatten)]
        changes: UpdateArgs,
    },

    /// Delete a student
    #[command(alias = "rm", display_order = 5)]
    Delete {
        id: String,

        /// Skip confirmation
        #[arg(short, long)]
        yes: bool,
    },

    /// Dashboard numbers and per-programme / per-level counts
    #[command(display_order = 10)]
    Stats,

    /// Generate a report
    #[command(display_order = 11)]
    Report(ReportArgs),

    /// Import students from a CSV file
    #[command(display_order = 20)]
    Import { path: PathBuf },

    /// Export all students to a CSV file
    #[command(display_order = 21)]
    Export { path: PathBuf },
}

#[derive(Args, Debug, Default)]
pub struct ListArgs {
    /// Case-insensitive text matched against id, name, email and programme
    #[arg(short, long)]
    pub search: Option<String>,

    /// One of the configured programmes
    #[arg(long)]
    pub programme: Option<String>,

    /// One of the configured levels
    #[arg(long)]
    pub level: Option<String>,

    /// Active or Inactive
    #[arg(long)]
    pub status: Option<Status>,
}

impl ListArgs {
    pub fn criteria(&self, config: &RosterConfig) -> Result<Criteria> {
        Ok(Criteria {
            search_text: self.search.clone().unwrap_or_default(),
            programme: config.programme_filter(self.programme.as_deref())?,
            level: config.level_filter(self.level.as_deref())?,
            status: Choice::from(self.status),
        })
    }
}

#[derive(Args, Debug)]
pub struct AddArgs {
    #[arg(long)]
    pub id: String,

    #[arg(long)]
    pub name: String,

    #[arg(long)]
    pub programme: String,

    #[arg(long)]
    pub level: String,

    /// 0.0 to 4.0
    #[arg(long, allow_hyphen_values = true)]
    pub gpa: String,

    #[arg(long)]
    pub email: String,

    #[arg(long, default_value = "")]
    pub phone: String,

    #[arg(long, default_value = "Active")]
    pub status: Status,
}

impl AddArgs {
    pub fn form(&self) -> StudentForm {
        StudentForm {
            id: self.id.clone(),
            full_name: self.name.clone(),
            programme: self.programme.clone(),
            level: self.level.clone(),
            gpa: self.gpa.clone(),
            email: self.email.clone(),
            phone: self.phone.clone(),
            status: self.status,
        }
    }
}

#[derive(Args, Debug, Default)]
pub struct UpdateArgs {
    /// Rename the student
    #[arg(long)]
    pub new_id: Option<String>,

    #[arg(long)]
    pub name: Option<String>,

    #[arg(long)]
    pub programme: Option<String>,

    #[arg(long)]
    pub level: Option<String>,

    #[arg(long, allow_hyphen_values = true)]
    pub gpa: Option<String>,

    #[arg(long)]
    pub email: Option<String>,

    #[arg(long)]
    pub phone: Option<String>,

    #[arg(long)]
    pub status: Option<Status>,
}

impl UpdateArgs {
    /// Overwrites the fields that were given on the command line.
    pub fn apply(&self, form: &mut StudentForm) {
        let text_fields = [
            (&self.new_id, &mut form.id),
            (&self.name, &mut form.full_name),
            (&self.programme, &mut form.programme),
            (&self.level, &mut form.level),
            (&self.gpa, &mut form.gpa),
            (&self.email, &mut form.email),
            (&self.phone, &mut form.phone),
        ];
        for (given, field) in text_fields {
            if let Some(value) = given {
                *field = value.clone();
            }
        }
        if let Some(status) = self.status {
            form.status = status;
        }
    }
}

#[derive(Args, Debug)]
pub struct ReportArgs {
    /// Which report (see below)
    pub kind: ReportKind,

    /// Restrict by-programme to one of the configured programmes
    #[arg(long)]
    pub programme: Option<String>,

    /// Restrict by-level to one of the configured levels
    #[arg(long)]
    pub level: Option<String>,

    /// Restrict status to Active or Inactive
    #[arg(long)]
    pub status: Option<Status>,

    /// First day for date-range (YYYY-MM-DD)
    #[arg(long)]
    pub start: Option<NaiveDate>,

    /// Last day for date-range (YYYY-MM-DD, defaults to today)
    #[arg(long)]
    pub end: Option<NaiveDate>,

    /// Also write the report to this file
    #[arg(long, value_name = "FILE")]
    pub out: Option<PathBuf>,
}

impl ReportArgs {
    pub fn params(&self, config: &RosterConfig) -> Result<ReportParams> {
        Ok(ReportParams {
            programme: config.programme_filter(self.programme.as_deref())?,
            level: config.level_filter(self.level.as_deref())?,
            status: Choice::from(self.status),
            start: self.start,
            end: self.end,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("roster").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_naked_invocation_has_no_command() {
        assert!(parse(&[]).command.is_none());
    }

    #[test]
    fn test_list_filters_become_criteria() {
        let cli = parse(&["list", "-s", "doe", "--status", "Inactive"]);
        let Some(Commands::List(args)) = cli.command else {
            panic!("expected list");
        };
        let criteria = args.criteria(&RosterConfig::default()).unwrap();
        assert_eq!(criteria.search_text, "doe");
        assert_eq!(criteria.status, Choice::Only(Status::Inactive));
        assert_eq!(criteria.programme, Choice::All);
    }

    #[test]
    fn test_filters_limited_to_configured_choices() {
        let config = RosterConfig {
            programmes: vec!["Arts".into(), "Law".into()],
            ..Default::default()
        };

        let cli = parse(&["list", "--programme", "Law"]);
        let Some(Commands::List(args)) = cli.command else {
            panic!("expected list");
        };
        assert_eq!(
            args.criteria(&config).unwrap().programme,
            Choice::Only("Law".to_string())
        );

        let cli = parse(&["report", "by-programme", "--programme", "Medicine"]);
        let Some(Commands::Report(args)) = cli.command else {
            panic!("expected report");
        };
        assert!(args.params(&config).is_err());
    }

    #[test]
    fn test_status_is_case_sensitive() {
        let result =
            Cli::try_parse_from(["roster", "list", "--status", "active"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_global_options_after_subcommand() {
        let cli = parse(&["stats", "--no-sample", "--load", "a.csv", "--load", "b.csv"]);
        assert!(cli.no_sample);
        assert_eq!(cli.load, vec![PathBuf::from("a.csv"), PathBuf::from("b.csv")]);
    }

    #[test]
    fn test_add_builds_raw_form() {
        let cli = parse(&[
            "add", "--id", "S100", "--name", "Ada", "--programme", "Arts", "--level", "100",
            "--gpa", "-1", "--email", "a@b.c",
        ]);
        let Some(Commands::Add(args)) = cli.command else {
            panic!("expected add");
        };
        let form = args.form();
        assert_eq!(form.gpa, "-1");
        assert_eq!(form.phone, "");
        assert_eq!(form.status, Status::Active);
    }

    #[test]
    fn test_update_keeps_unspecified_fields() {
        let cli = parse(&["update", "S001", "--gpa", "2.5", "--status", "Inactive"]);
        let Some(Commands::Update { id, changes }) = cli.command else {
            panic!("expected update");
        };
        assert_eq!(id, "S001");

        let mut form = StudentForm {
            id: "S001".into(),
            full_name: "John Doe".into(),
            gpa: "3.8".into(),
            ..Default::default()
        };
        changes.apply(&mut form);
        assert_eq!(form.id, "S001");
        assert_eq!(form.full_name, "John Doe");
        assert_eq!(form.gpa, "2.5");
        assert_eq!(form.status, Status::Inactive);
    }

    #[test]
    fn test_report_kind_and_dates() {
        let cli = parse(&[
            "report", "date-range", "--start", "2024-02-01", "--out", "r.txt",
        ]);
        let Some(Commands::Report(args)) = cli.command else {
            panic!("expected report");
        };
        assert_eq!(args.kind, ReportKind::DateRange);
        let params = args.params(&RosterConfig::default()).unwrap();
        assert_eq!(params.start, NaiveDate::from_ymd_opt(2024, 2, 1));
        assert_eq!(params.end, None);
        assert_eq!(args.out, Some(PathBuf::from("r.txt")));
    }

    #[test]
    fn test_unknown_report_kind_rejected() {
        assert!(Cli::try_parse_from(["roster", "report", "weekly"]).is_err());
    }
}
