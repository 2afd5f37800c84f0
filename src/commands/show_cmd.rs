use crate::commands::base_commands::Commands;
use crate::commands::report_format::{PortfolioReport, format_portfolio_report};
use crate::commands::scenario_cmd::load_session;

pub async fn show_command(cmd: Commands) {
    if let Commands::Show { session } = cmd {
        let Some(portfolio) = load_session(&session).await else {
            return;
        };
        let report = PortfolioReport::from_portfolio(&portfolio);
        println!("{}", format_portfolio_report(&report));
    }
}
