use std::path::PathBuf;

use anyhow::{Context as _, Result, bail};
use camps_business::table::{ColumnPredicate, DateRange, FilterCriteria, SortDescriptor, SortKey};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;

#[derive(Parser)]
#[command(name = "camps")]
#[command(about = "Browse the camp network admin data from the terminal", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Show timing/latency information
    #[arg(long, global = true)]
    pub timing: bool,

    /// Enable verbose debug output
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    /// Use this config file instead of the default location
    #[arg(long, global = true, env = "CAMPS_CONFIG")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show one page of records
    List(ListArgs),
    /// Show the columns of an entity
    Columns {
        #[arg(value_enum)]
        entity: EntityKind,
    },
    /// Store credentials for later requests
    Login {
        #[arg(long, short = 'u')]
        username: String,

        /// API token issued by the backend
        #[arg(long, short = 't', env = "CAMPS_TOKEN", hide_env_values = true)]
        token: String,
    },
    /// Forget the stored session
    Logout,
    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum EntityKind {
    Activities,
    Complaints,
    Contributors,
    Governorates,
    Representatives,
    Notifications,
    Partners,
}

#[derive(Debug, Args)]
pub struct ListArgs {
    #[arg(value_enum)]
    pub entity: EntityKind,

    /// Case-insensitive text to look for in searchable columns
    #[arg(long, short = 's')]
    pub search: Option<String>,

    /// Column filter: `col=value`, `col>=number` or `col<=number`
    #[arg(long = "where", short = 'w', value_parser = parse_where)]
    pub filters: Vec<WhereClause>,

    /// Earliest day to include (YYYY-MM-DD)
    #[arg(long, value_parser = parse_day)]
    pub from: Option<NaiveDate>,

    /// Last day to include (YYYY-MM-DD)
    #[arg(long, value_parser = parse_day)]
    pub to: Option<NaiveDate>,

    /// Column the date range applies to, defaults to the entity's date column
    #[arg(long)]
    pub date_column: Option<String>,

    /// Sort keys, comma separated; a leading `-` sorts that key descending
    /// (e.g. `status,-createdAt`)
    #[arg(long, allow_hyphen_values = true)]
    pub sort: Option<String>,

    /// Flip the direction of the first sort key
    #[arg(long, requires = "sort")]
    pub desc: bool,

    /// Page to show, starting at 1
    #[arg(long, short = 'p', default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    pub page: u32,

    /// Rows per page
    #[arg(long)]
    pub page_size: Option<usize>,

    /// Read records from a JSON file instead of the API
    #[arg(long, short = 'i')]
    pub input: Option<PathBuf>,
}

/// One `--where` flag.
#[derive(Debug, Clone, PartialEq)]
pub enum WhereClause {
    Equals { column: String, value: String },
    AtLeast { column: String, min: f64 },
    AtMost { column: String, max: f64 },
}

impl WhereClause {
    pub fn column(&self) -> &str {
        match self {
            Self::Equals { column, .. } | Self::AtLeast { column, .. } | Self::AtMost { column, .. } => {
                column
            }
        }
    }
}

fn parse_where(raw: &str) -> Result<WhereClause> {
    let number = |column: &str, value: &str| -> Result<(String, f64)> {
        let column = column.trim();
        if column.is_empty() {
            bail!("missing column name in `{raw}`");
        }
        let value = value
            .trim()
            .parse::<f64>()
            .with_context(|| format!("`{}` is not a number", value.trim()))?;
        Ok((column.to_owned(), value))
    };

    // the leftmost operator wins, so `title=a<=b` stays an equality
    let Some(at) = raw.find(['=', '<', '>']) else {
        bail!("expected `col=value`, `col>=number` or `col<=number`, got `{raw}`");
    };
    let (column, rest) = raw.split_at(at);

    if let Some(value) = rest.strip_prefix(">=") {
        let (column, min) = number(column, value)?;
        return Ok(WhereClause::AtLeast { column, min });
    }
    if let Some(value) = rest.strip_prefix("<=") {
        let (column, max) = number(column, value)?;
        return Ok(WhereClause::AtMost { column, max });
    }
    match rest.strip_prefix('=') {
        Some(value) if !column.trim().is_empty() => Ok(WhereClause::Equals {
            column: column.trim().to_owned(),
            value: value.trim().to_owned(),
        }),
        _ => bail!("expected `col=value`, `col>=number` or `col<=number`, got `{raw}`"),
    }
}

fn parse_day(raw: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .with_context(|| format!("`{raw}` is not a YYYY-MM-DD date"))
}

impl ListArgs {
    /// Column predicates for the flags, bounds on one column merged together.
    pub fn predicates(&self, default_date_column: Option<&str>) -> Result<Vec<ColumnPredicate>> {
        let mut predicates: Vec<ColumnPredicate> = Vec::new();

        for clause in &self.filters {
            let next = match clause {
                WhereClause::Equals { column, value } => ColumnPredicate::equals(column, value),
                WhereClause::AtLeast { column, min } => {
                    let max = number_bounds(&predicates, column).and_then(|(_, max)| max);
                    ColumnPredicate::number_range(column, Some(*min), max)
                }
                WhereClause::AtMost { column, max } => {
                    let min = number_bounds(&predicates, column).and_then(|(min, _)| min);
                    ColumnPredicate::number_range(column, min, Some(*max))
                }
            };
            predicates.retain(|p| p.column().as_str() != clause.column());
            predicates.push(next);
        }

        if self.from.is_some() || self.to.is_some() {
            let Some(column) = self.date_column.as_deref().or(default_date_column) else {
                bail!("--from/--to need --date-column for this entity");
            };
            predicates.retain(|p| p.column().as_str() != column);
            predicates.push(ColumnPredicate::date_range(
                column,
                DateRange::new(self.from, self.to),
            ));
        }

        Ok(predicates)
    }

    pub fn criteria(&self, default_date_column: Option<&str>) -> Result<FilterCriteria> {
        let criteria = FilterCriteria::new().with_search(self.search.clone().unwrap_or_default());
        Ok(self
            .predicates(default_date_column)?
            .into_iter()
            .fold(criteria, FilterCriteria::with_predicate))
    }

    pub fn sort_descriptor(&self) -> SortDescriptor {
        let mut keys = self
            .sort
            .as_deref()
            .unwrap_or_default()
            .split(',')
            .filter_map(SortKey::parse);

        let Some(mut primary) = keys.next() else {
            return SortDescriptor::none();
        };
        if self.desc {
            primary.direction = primary.direction.toggle();
        }
        keys.fold(
            SortDescriptor::by(primary.column.as_str(), primary.direction),
            |sort, key| sort.then_by(key.column.as_str(), key.direction),
        )
    }

    /// Zero-based page index.
    pub fn page_index(&self) -> usize {
        self.page.saturating_sub(1) as usize
    }
}

fn number_bounds(predicates: &[ColumnPredicate], column: &str) -> Option<(Option<f64>, Option<f64>)> {
    predicates.iter().find_map(|predicate| match predicate {
        ColumnPredicate::NumberRange { column: c, min, max } if c.as_str() == column => {
            Some((*min, *max))
        }
        _ => None,
    })
}
