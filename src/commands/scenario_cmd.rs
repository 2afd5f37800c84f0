use crate::commands::base_commands::{Commands, position_to_index};
use crate::services::portfolio::Portfolio;
use crate::services::session_yaml::{load_portfolio_from_yaml_file, save_portfolio_to_yaml_file};

pub async fn init_command(cmd: Commands) {
    if let Commands::Init { session } = cmd {
        let portfolio = Portfolio::new();
        if let Err(e) = save_portfolio_to_yaml_file(&session, &portfolio).await {
            eprintln!("Failed to write session: {e:?}");
        } else {
            println!("New session written to {session}");
        }
    }
}

pub async fn add_command(cmd: Commands) {
    if let Commands::Add { session } = cmd {
        let Some(mut portfolio) = load_session(&session).await else {
            return;
        };
        portfolio.add_scenario();
        let count = portfolio.scenarios().len();
        if save_session(&session, &portfolio).await {
            println!("Added property {count} to {session}");
        }
    }
}

pub async fn set_command(cmd: Commands) {
    if let Commands::Set {
        session,
        position,
        field,
        value,
    } = cmd
    {
        let Some(mut portfolio) = load_session(&session).await else {
            return;
        };
        let Some(index) = position_to_index(position) else {
            eprintln!("Property numbers start at 1");
            return;
        };
        match portfolio.update_scenario(index, field, &value) {
            Ok(true) => {
                if save_session(&session, &portfolio).await {
                    println!("Property {position}: {} set to {value}", field.label());
                }
            }
            Ok(false) => eprintln!(
                "Property {position}: '{value}' is not a valid value for {}, keeping the previous value",
                field.label()
            ),
            Err(e) => eprintln!("Failed to edit property: {e}"),
        }
    }
}

pub async fn remove_command(cmd: Commands) {
    if let Commands::Remove { session, position } = cmd {
        let Some(mut portfolio) = load_session(&session).await else {
            return;
        };
        let Some(index) = position_to_index(position) else {
            eprintln!("Property numbers start at 1");
            return;
        };
        if portfolio.scenarios().len() <= 1 {
            eprintln!("Cannot remove the only property of a session");
            return;
        }
        match portfolio.remove_scenario(index) {
            Ok(_) => {
                if save_session(&session, &portfolio).await {
                    println!("Removed property {position} from {session}");
                }
            }
            Err(e) => eprintln!("Failed to remove property: {e}"),
        }
    }
}

pub(crate) async fn load_session(session: &str) -> Option<Portfolio> {
    match load_portfolio_from_yaml_file(session).await {
        Ok(portfolio) => Some(portfolio),
        Err(e) => {
            eprintln!("Failed to load session: {e:?}");
            None
        }
    }
}

pub(crate) async fn save_session(session: &str, portfolio: &Portfolio) -> bool {
    match save_portfolio_to_yaml_file(session, portfolio).await {
        Ok(()) => true,
        Err(e) => {
            eprintln!("Failed to write session: {e:?}");
            false
        }
    }
}
