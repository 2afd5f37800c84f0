use crate::commands::base_commands::Commands;
use crate::commands::scenario_cmd::load_session;
use crate::services::portfolio_charts::write_projection_chart_png;

pub async fn project_command(cmd: Commands) {
    if let Commands::Project { session, output } = cmd {
        let Some(portfolio) = load_session(&session).await else {
            return;
        };
        match write_projection_chart_png(&output, &portfolio.projections()).await {
            Ok(()) => println!("Projection chart written to {output}"),
            Err(e) => eprintln!("Failed to plot projection: {e:?}"),
        }
    }
}
