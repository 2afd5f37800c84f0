use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use tokio::task::JoinHandle;

use crate::commands::base_commands::Commands;
use crate::commands::report_format::{PortfolioReport, format_portfolio_report};
use crate::commands::scenario_cmd::{load_session, save_session};
use crate::services::calculation_service::HttpCalculationService;
use crate::services::dispatcher::SimulationDispatcher;
use crate::services::portfolio::Portfolio;
use crate::services::portfolio_charts::{
    IndicatorBar, write_indicator_chart_png, write_projection_chart_png,
};
use crate::services::projection::property_label;
use crate::services::service_config::ServiceConfig;

const SLOW_RUN_NOTICE_AFTER: Duration = Duration::from_secs(2);

pub async fn simulate_command(cmd: Commands) {
    if let Commands::Simulate {
        session,
        config,
        service_url,
        output,
        charts,
    } = cmd
    {
        let service_config =
            match ServiceConfig::resolve(config.as_deref(), service_url.as_deref()).await {
                Ok(cfg) => cfg,
                Err(e) => {
                    eprintln!("Failed to load service config: {e:?}");
                    return;
                }
            };
        let service = match HttpCalculationService::new(&service_config) {
            Ok(service) => service,
            Err(e) => {
                eprintln!("Failed to create calculation client: {e:?}");
                return;
            }
        };
        let Some(mut portfolio) = load_session(&session).await else {
            return;
        };

        if portfolio.scenarios().is_empty() {
            eprintln!("No properties to simulate in {session}");
            return;
        }

        let dispatcher = SimulationDispatcher::new(service);
        let notice = spawn_slow_run_notice(portfolio.busy_flag());
        let outcome = portfolio.simulate(&dispatcher).await;
        notice.abort();
        if let Err(e) = outcome {
            eprintln!("Failed to simulate properties: {e}");
            return;
        }
        if !save_session(&session, &portfolio).await {
            return;
        }

        let report = PortfolioReport::from_portfolio(&portfolio);
        println!("{}", format_portfolio_report(&report));

        if let Some(output) = output {
            match serde_yaml::to_string(&report) {
                Ok(yaml) => {
                    if let Err(e) = tokio::fs::write(&output, yaml).await {
                        eprintln!("Failed to write report: {e:?}");
                    } else {
                        println!("Report written to {output}");
                    }
                }
                Err(e) => eprintln!("Failed to serialize report: {e:?}"),
            }
        }

        if let Some(prefix) = charts {
            write_charts(&prefix, &portfolio).await;
        }
    }
}

/// Tells the user the run is still waiting on the service once it has been
/// busy for a while.
fn spawn_slow_run_notice(busy: Arc<AtomicBool>) -> JoinHandle<()> {
    tokio::spawn(async move {
        tokio::time::sleep(SLOW_RUN_NOTICE_AFTER).await;
        if busy.load(Ordering::SeqCst) {
            eprintln!("Still waiting for the calculation service...");
        }
    })
}

async fn write_charts(prefix: &str, portfolio: &Portfolio) {
    let bars: Vec<IndicatorBar> = portfolio
        .simulated()
        .iter()
        .map(|property| IndicatorBar {
            label: property_label(property.position),
            cap_rate: property.result.cap_rate,
            cash_on_cash: property.result.cash_on_cash,
        })
        .collect();

    let indicators_path = format!("{prefix}.indicators.png");
    match write_indicator_chart_png(&indicators_path, &bars).await {
        Ok(()) => println!("Indicator chart written to {indicators_path}"),
        Err(e) => eprintln!("Failed to write indicator chart: {e:?}"),
    }

    let projection_path = format!("{prefix}.projection.png");
    match write_projection_chart_png(&projection_path, &portfolio.projections()).await {
        Ok(()) => println!("Projection chart written to {projection_path}"),
        Err(e) => eprintln!("Failed to write projection chart: {e:?}"),
    }
}
