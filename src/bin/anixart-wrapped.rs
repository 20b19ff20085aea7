use anixart_wrapped::config::default_session_path;
use anixart_wrapped::models::Release;
use anixart_wrapped::{
    report, AnixartApi, Config, Deck, Session, WrappedBuilder, WrappedError, YearWindow,
};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "anixart-wrapped")]
#[command(about = "Your year on Anixart, in the terminal", long_about = None)]
struct Cli {
    /// Config file (TOML)
    #[arg(long, env = "ANIXART_CONFIG")]
    config: Option<PathBuf>,

    /// Session file holding the token
    #[arg(long, env = "ANIXART_SESSION")]
    session: Option<PathBuf>,

    /// Log requests and pipeline steps
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sign in and store the session token
    Login {
        #[arg(long, env = "ANIXART_LOGIN")]
        login: String,

        #[arg(long, env = "ANIXART_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Forget the stored session
    Logout,
    /// Show the signed-in profile
    Whoami,
    /// Build the year in review
    Wrapped {
        /// Year to review (defaults to the current one)
        #[arg(short, long)]
        year: Option<i32>,

        /// Print JSON instead of slides
        #[arg(long)]
        json: bool,

        /// Print only this slide (1-based)
        #[arg(long)]
        slide: Option<usize>,
    },
    /// Show one release
    Release {
        id: i64,
    },
    /// Show a random release
    Random,
    /// Show a collection and one page of its releases
    Collection {
        id: i64,

        /// Page of releases (0-based)
        #[arg(short, long, default_value = "0")]
        page: u64,
    },
}

/// A failed profile fetch usually means the stored session went stale.
fn with_session_hint(e: WrappedError) -> Box<dyn std::error::Error> {
    format!(
        "{}\nThe session may have expired: run `anixart-wrapped logout`, then `anixart-wrapped login` again.",
        e
    )
    .into()
}

fn print_release(release: &Release) {
    println!("{} (ID: {})", release.display_title(), release.id);
    if let Some(genres) = &release.genres {
        println!("   Genres: {}", genres);
    }
    if let Some(url) = release.poster_url() {
        println!("   Poster: {}", url);
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose {
        "anixart_wrapped=debug"
    } else {
        "anixart_wrapped=warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = Config::load_or_default(cli.config.as_deref())?;
    let session_path = cli
        .session
        .or_else(default_session_path)
        .ok_or("no config directory; pass --session")?;

    match cli.command {
        Commands::Login { login, password } => {
            let mut api = AnixartApi::new(config.api, Session::default())?;
            let sign_in = api.sign_in(&login, &password).await?;
            api.session().save(&session_path)?;
            println!(
                "✅ Signed in as {} (profile {})",
                sign_in.profile.login, sign_in.profile.id
            );
        }
        Commands::Logout => {
            Session::clear(&session_path)?;
            println!("Signed out");
        }
        Commands::Whoami => {
            let api = AnixartApi::new(config.api, Session::load(&session_path)?)?;
            let profile = api.get_profile(None).await.map_err(with_session_hint)?;
            println!("{} (profile {})", profile.login, profile.id);
            println!("   Episodes watched: {}", profile.watched_episode_count);
            println!("   Completed: {}", profile.completed_count);
        }
        Commands::Wrapped { year, json, slide } => {
            let api = AnixartApi::new(config.api, Session::load(&session_path)?)?;
            let window = year.map(YearWindow::local).unwrap_or_else(YearWindow::current);

            let wrapped = WrappedBuilder::new(&api, window)
                .with_config(&config.wrapped)
                .build()
                .await
                .map_err(with_session_hint)?;

            if json {
                println!("{}", report::to_json(&wrapped)?);
                return Ok(());
            }

            let mut deck = Deck::from_wrapped(&wrapped);
            match slide {
                Some(n) => {
                    deck.go_to(n.saturating_sub(1));
                    if let Some(current) = deck.current() {
                        println!(
                            "[{}/{}] {}",
                            deck.position() + 1,
                            deck.len(),
                            report::render_slide(&wrapped, current)
                        );
                    }
                }
                None => println!("{}", report::render_deck(&wrapped, &deck)),
            }
        }
        Commands::Release { id } => {
            let api = AnixartApi::new(config.api, Session::load(&session_path)?)?;
            let release = api.get_release(id).await?;
            print_release(&release);
        }
        Commands::Random => {
            let api = AnixartApi::new(config.api, Session::load(&session_path)?)?;
            let release = api.get_random_release().await?;
            print_release(&release);
        }
        Commands::Collection { id, page } => {
            let api = AnixartApi::new(config.api, Session::load(&session_path)?)?;
            let collection = api.get_collection(id).await?;
            println!("{} (ID: {})", collection.title, collection.id);
            if let Some(desc) = collection.description.as_deref().filter(|d| !d.is_empty()) {
                println!("   {}", desc);
            }

            let releases = api.get_collection_releases(id, page).await?;
            if releases.is_empty() {
                println!("   No releases on page {}", page);
            }
            for release in &releases.content {
                println!("   - {}", release.display_title());
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_failure_suggests_logging_in_again() {
        let err = with_session_hint(WrappedError::ApiError {
            endpoint: "profile/1".to_string(),
            code: 401,
        });
        let message = err.to_string();
        assert!(message.contains("profile/1"));
        assert!(message.contains("anixart-wrapped logout"));
        assert!(message.contains("anixart-wrapped login"));
    }
}
