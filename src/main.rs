//! senggen's main application entry point.
//! Handles command-line argument parsing and dispatches to the generation
//! and settings commands.

use std::io::IsTerminal;
use std::path::PathBuf;

use senggen::{
    cli::{get_args, parse_variables, Args, Command, NewArgs, SettingsCommand},
    error::{default_error_handler, Result},
    generate::{generate, GenerateOptions},
    logger::init_logger,
    prompt::{ask_missing, require_answers, DialoguerPrompter},
    renderer::MiniJinjaRenderer,
    settings::{
        describe_settings, get_settings, reset_settings, set_global_settings,
        set_local_settings, FileSettingsStore, SettingsFile, SettingsStore,
    },
    variables::display_value,
};

/// Main application entry point.
fn main() {
    let args = get_args();
    init_logger(args.verbose);

    if let Err(err) = run(args) {
        default_error_handler(err);
    }
}

fn run(args: Args) -> Result<()> {
    let store = FileSettingsStore::from_env();
    match args.command {
        Command::New(new_args) => run_new(&store, new_args),
        Command::Settings(command) => run_settings(&store, command),
        Command::List => run_list(&store),
    }
}

/// Generates a scaffold.
///
/// # Flow
/// 1. Resolves settings, applying `--template-path`
/// 2. Collects the type, name and variables, prompting when interactive
/// 3. Renders the template and writes it to the destination
fn run_new(store: &dyn SettingsStore, args: NewArgs) -> Result<()> {
    let overrides = SettingsFile {
        template_path: args.template_path,
        ..Default::default()
    };
    let settings = get_settings(store, overrides)?;
    let variables = parse_variables(&args.variables)?;

    let answers = if args.no_input || !std::io::stdin().is_terminal() {
        require_answers(args.template, args.name, variables)?
    } else {
        ask_missing(&DialoguerPrompter::new(), &settings, args.template, args.name, variables)?
    };

    let options = GenerateOptions {
        name: answers.name,
        destination: args.destination.unwrap_or_else(|| PathBuf::from(&settings.destination)),
        variables: answers.variables,
        force: args.force,
    };

    println!(
        "Generating files from '{}' template with name: {}",
        answers.template, options.name
    );

    let engine = MiniJinjaRenderer::new();
    for path in generate(&answers.template, &options, &settings, &engine)? {
        println!("created: '{}'", path.display());
    }

    println!("Done! Files generated in {}.", options.destination.display());
    Ok(())
}

fn run_settings(store: &dyn SettingsStore, command: SettingsCommand) -> Result<()> {
    match command {
        SettingsCommand::Show => {
            let settings = get_settings(store, SettingsFile::default())?;
            print!("{}", describe_settings(&settings)?);
        }
        SettingsCommand::Set { values, global } => {
            let mut updates = SettingsFile::default();
            for (key, value) in parse_variables(&values)? {
                updates.set(&key, &display_value(&value))?;
            }
            if global {
                set_global_settings(store, updates)?;
            } else {
                set_local_settings(store, updates)?;
            }
            println!("Settings saved.");
        }
        SettingsCommand::Reset => {
            reset_settings(store)?;
            println!("Global settings reset.");
        }
    }
    Ok(())
}

fn run_list(store: &dyn SettingsStore) -> Result<()> {
    let settings = get_settings(store, SettingsFile::default())?;
    if settings.templates.is_empty() {
        println!("No templates found (template path: '{}').", settings.template_path);
    }
    for (id, template) in &settings.templates {
        println!("{}: '{}'", id, template.path.display());
    }
    Ok(())
}
