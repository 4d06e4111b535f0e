//! Subcommand implementations, one module per command.

pub mod columns;
pub mod completions;
pub mod list;
pub mod login;

use anyhow::Result;
use camps_business::entities::{
    Activity, Complaint, Contributor, Governorate, Notification, Partner, Representative,
};

pub use completions::generate_completions;
pub use login::{run_login, run_logout};

use crate::{
    cli::{EntityKind, ListArgs},
    context::AppContext,
};

pub async fn run_list(app: &AppContext, args: &ListArgs) -> Result<()> {
    match args.entity {
        EntityKind::Activities => list::run::<Activity>(app, args).await,
        EntityKind::Complaints => list::run::<Complaint>(app, args).await,
        EntityKind::Contributors => list::run::<Contributor>(app, args).await,
        EntityKind::Governorates => list::run::<Governorate>(app, args).await,
        EntityKind::Representatives => list::run::<Representative>(app, args).await,
        EntityKind::Notifications => list::run::<Notification>(app, args).await,
        EntityKind::Partners => list::run::<Partner>(app, args).await,
    }
}

pub fn print_columns(entity: EntityKind) {
    match entity {
        EntityKind::Activities => columns::run::<Activity>(),
        EntityKind::Complaints => columns::run::<Complaint>(),
        EntityKind::Contributors => columns::run::<Contributor>(),
        EntityKind::Governorates => columns::run::<Governorate>(),
        EntityKind::Representatives => columns::run::<Representative>(),
        EntityKind::Notifications => columns::run::<Notification>(),
        EntityKind::Partners => columns::run::<Partner>(),
    }
}
