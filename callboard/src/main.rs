use callboard_core::format::format_number_value;
use callboard_core::{ChartSurface, EditOutcome, EditStep, EditWorkflow, SaveSync, Settings};
use callboard_gui::{run_gui, GuiConfig};
use clap::Parser;
use prefstore::{PreferenceStore, StoreFactory, StoreKind};

mod commands;
mod output;

use commands::{Cli, Commands};
use output::{print_error, print_info, print_series, print_warning};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    let mut settings = Settings::load(cli.config.as_deref())?;
    if cli.memory {
        settings.store.kind = StoreKind::Memory;
    }
    let surface = ChartSurface::seeded();
    settings.validate(surface.points().len())?;
    let mut surface = surface.with_slot_index(settings.dashboard.slot_index)?;

    let Some(command) = cli.command else {
        run_gui(GuiConfig::default(), &settings)?;
        return Ok(());
    };

    match command {
        Commands::Show => {
            print_info(&format!("Editable slot: {}", surface.slot_label()));
            print_series(&surface);
        }
        Commands::Lookup { email } => {
            let store = StoreFactory::create(&settings.store_config())?;
            match store.lookup(&email, &surface.slot_label()) {
                Ok(Some(found)) => println!("{}", format_number_value(found.custom_value)),
                Ok(None) => println!("none"),
                Err(err) => {
                    print_error(&format!("lookup failed: {err}"));
                    std::process::exit(1);
                }
            }
        }
        Commands::Edit {
            email,
            value,
            overwrite,
        } => {
            let store = StoreFactory::create(&settings.store_config())?;
            let workflow = EditWorkflow::new(store);
            let mut session = workflow.open(&surface);
            session.email = email;
            let step = match workflow.submit_identity(&mut session) {
                Ok(step) => step,
                Err(err) => {
                    print_error(&err.to_string());
                    std::process::exit(1);
                }
            };
            if step == EditStep::ConfirmOverwrite {
                let previous = session.previous_remote_value().unwrap_or_default();
                if !overwrite {
                    session.cancel();
                    print_info(&format!(
                        "A value is already stored ({}); pass --overwrite to replace it",
                        format_number_value(previous)
                    ));
                    return Ok(());
                }
                session.confirm_overwrite()?;
            }
            session.candidate_value = value;
            let outcome = match workflow.submit_value(&mut session) {
                Ok(outcome) => outcome,
                Err(err) => {
                    print_error(&err.to_string());
                    std::process::exit(1);
                }
            };
            workflow.finish(&outcome, &mut surface)?;
            if let EditOutcome::Saved { value, sync, .. } = &outcome {
                match sync {
                    SaveSync::Everywhere => print_info(&format!(
                        "Saved {} = {}",
                        surface.slot_label(),
                        format_number_value(*value)
                    )),
                    SaveSync::LocalOnly { reason } => {
                        print_warning(&format!("Saved locally only: {reason}"))
                    }
                }
            }
            print_series(&surface);
        }
        Commands::Config { write } => match write {
            Some(path) => {
                settings.save_file(&path)?;
                print_info(&format!("Settings written to {}", path.display()));
            }
            None => {
                print_info(&format!("store: {}", settings.store.kind.as_str()));
                println!("endpoint = {}", settings.store.endpoint);
                println!("table = {}", settings.store.table);
                println!("timeout_secs = {}", settings.store.timeout_secs);
                println!("slot_index = {}", settings.dashboard.slot_index);
            }
        },
    }
    Ok(())
}
