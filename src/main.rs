use clap::Parser;
use color_eyre::Result;
use genjin::{
    ClientStore, Config, Profile,
    cli::{Cli, Commands},
    filter::ClientFilters,
    presets::sample_clients,
    utils::{expand_path, today_local},
};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Set up error reporting with color-eyre
    color_eyre::install()?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    // Parse CLI arguments
    let cli = Cli::parse();

    // Determine profile: --dev flag enables dev mode, otherwise use prod
    let profile = if cli.dev { Profile::Dev } else { Profile::Prod };

    // Pick the client collection: in-memory sample data, an explicit data
    // file, or the configured snapshot path.
    let mut store = if cli.sample {
        ClientStore::in_memory(sample_clients())
    } else if let Some(data) = &cli.data {
        ClientStore::open(&expand_path(data))?
    } else {
        // Note: --config is parsed but not yet used to override the config
        // path; the profile decides where the config lives.
        let config = Config::load_with_profile(profile)?;
        ClientStore::open(&config.get_data_path())?
    };

    // One "today" per invocation, shared by every derivation below.
    let today = today_local();

    match cli.command.unwrap_or(Commands::Dashboard) {
        Commands::Dashboard => {
            genjin::cli::handle_dashboard(&store, today)?;
        }
        Commands::Suggest => {
            genjin::cli::handle_suggest(&store, today)?;
        }
        Commands::List {
            keyword,
            tag,
            urgency,
            status,
            area,
        } => {
            let filters = ClientFilters {
                keyword: keyword.unwrap_or_default(),
                areas: area,
                statuses: status,
                urgencies: urgency,
                tags: tag,
            };
            genjin::cli::handle_list(&store, &filters)?;
        }
        Commands::Show { id } => {
            genjin::cli::handle_show(&store, &id, today)?;
        }
        Commands::Intake { text } => {
            genjin::cli::handle_intake(&mut store, &text)?;
        }
        Commands::AddClient {
            remark_name,
            name,
            phone,
            wechat,
            birthday,
            tags,
        } => {
            genjin::cli::handle_add_client(&mut store, remark_name, name, phone, wechat, birthday, tags)?;
        }
        Commands::AddLog {
            client,
            content,
            template,
            next_date,
            next_action,
            todo,
        } => {
            genjin::cli::handle_add_log(
                &mut store,
                &client,
                content,
                template,
                next_date,
                next_action,
                todo,
            )?;
        }
        Commands::Presets => {
            genjin::cli::handle_presets()?;
        }
        Commands::Complete { log } => {
            genjin::cli::handle_complete(&mut store, &log)?;
        }
        Commands::Postpone { log, to } => {
            genjin::cli::handle_postpone(&mut store, &log, &to)?;
        }
    }

    Ok(())
}
