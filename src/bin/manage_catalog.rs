//! CLI tool to manage catalog reference data.
//!
//! Usage:
//!   cargo run --bin manage-catalog -- add-user --username <name>
//!   cargo run --bin manage-catalog -- add-framework --name <name>
//!   cargo run --bin manage-catalog -- list-frameworks
//!   cargo run --bin manage-catalog -- list-games <username>
//!   cargo run --bin manage-catalog -- add-game <username> --slug <slug> --name <name> \
//!       --framework <id> [--public]

use std::env;

use gamecast_lib::config::Config;
use gamecast_lib::db::DbPool;
use gamecast_lib::models::{NewGame, check_length, check_required, limits};
use gamecast_lib::services::build_notifier;
use gamecast_lib::services::catalog::{self, download_links};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        print_usage();
        std::process::exit(1);
    }

    let command = &args[1];

    if matches!(command.as_str(), "help" | "--help" | "-h") {
        print_usage();
        return;
    }

    let config = match Config::from_env() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error loading config: {}", e);
            std::process::exit(1);
        }
    };

    let pool = match DbPool::new(&config).await {
        Ok(p) => p,
        Err(e) => {
            eprintln!("Error connecting to database: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = pool.run_migrations().await {
        eprintln!("Error applying migrations: {}", e);
        std::process::exit(1);
    }

    match command.as_str() {
        "add-user" => {
            let username = parse_flag(&args, "--username", "-u");
            add_user(&pool, &username).await;
        }
        "add-framework" => {
            let name = parse_flag(&args, "--name", "-n");
            add_framework(&pool, &name).await;
        }
        "list-frameworks" => list_frameworks(&pool).await,
        "list-games" => {
            let Some(username) = args.get(2) else {
                eprintln!("Error: list-games requires a username");
                std::process::exit(1);
            };
            list_games(&pool, &config, username).await;
        }
        "add-game" => {
            let Some(username) = args.get(2) else {
                eprintln!("Error: add-game requires a username");
                std::process::exit(1);
            };
            let slug = parse_flag(&args, "--slug", "-s");
            let name = parse_flag(&args, "--name", "-n");
            let framework_id = match parse_flag(&args, "--framework", "-f").parse::<i32>() {
                Ok(id) => id,
                Err(_) => {
                    eprintln!("Error: --framework must be a framework id");
                    std::process::exit(1);
                }
            };
            let mut new_game = NewGame::new(name, slug, framework_id);
            new_game.is_public = args.iter().any(|arg| arg == "--public");
            add_game(&pool, &config, username, new_game).await;
        }
        _ => {
            eprintln!("Unknown command: {}", command);
            print_usage();
            std::process::exit(1);
        }
    }
}

fn parse_flag(args: &[String], long: &str, short: &str) -> String {
    let mut i = 2;
    while i < args.len() {
        if (args[i] == long || args[i] == short) && i + 1 < args.len() {
            return args[i + 1].clone();
        }
        i += 1;
    }
    eprintln!("Error: {} is required", long);
    std::process::exit(1);
}

async fn add_user(pool: &DbPool, username: &str) {
    if let Err(e) = check_required("username", username)
        .and_then(|_| check_length("username", username, limits::USERNAME))
    {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    match pool.insert_user(username).await {
        Ok(user) => println!("User '{}' created with id {}.", user.username, user.id),
        Err(e) if e.is_conflict() => {
            eprintln!("User '{}' already exists.", username);
            std::process::exit(1);
        }
        Err(e) => {
            eprintln!("Error creating user: {}", e);
            std::process::exit(1);
        }
    }
}

async fn add_framework(pool: &DbPool, name: &str) {
    if let Err(e) = check_required("name", name)
        .and_then(|_| check_length("name", name, limits::NAME))
    {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    match pool.insert_framework(name).await {
        Ok(framework) => println!(
            "Framework '{}' created with id {}.",
            framework.name, framework.id
        ),
        Err(e) => {
            eprintln!("Error creating framework: {}", e);
            std::process::exit(1);
        }
    }
}

async fn list_frameworks(pool: &DbPool) {
    let frameworks = match pool.list_frameworks().await {
        Ok(f) => f,
        Err(e) => {
            eprintln!("Error listing frameworks: {}", e);
            std::process::exit(1);
        }
    };

    if frameworks.is_empty() {
        println!("No frameworks found.");
        return;
    }

    println!();
    println!("{:<8} {:<40}", "ID", "NAME");
    println!("{}", "-".repeat(48));
    for framework in frameworks {
        println!("{:<8} {:<40}", framework.id, framework.name);
    }
    println!();
}

async fn list_games(pool: &DbPool, config: &Config, username: &str) {
    let user = match pool.get_user_by_username(username).await {
        Ok(Some(u)) => u,
        Ok(None) => {
            eprintln!("User '{}' not found.", username);
            std::process::exit(1);
        }
        Err(e) => {
            eprintln!("Error loading user: {}", e);
            std::process::exit(1);
        }
    };

    let games = match pool.list_games_by_owner(user.id).await {
        Ok(g) => g,
        Err(e) => {
            eprintln!("Error listing games: {}", e);
            std::process::exit(1);
        }
    };

    if games.is_empty() {
        println!("No games found for '{}'.", username);
        return;
    }

    println!();
    println!(
        "{:<26} {:<24} {:<30} {:<8}",
        "UUID", "SLUG", "NAME", "PUBLIC"
    );
    println!("{}", "-".repeat(90));

    for game in games {
        // Truncate name if too long
        let name = if game.name.chars().count() > 28 {
            format!("{}...", game.name.chars().take(25).collect::<String>())
        } else {
            game.name.clone()
        };

        println!(
            "{:<26} {:<24} {:<30} {:<8}",
            game.uuid, game.slug, name, game.is_public
        );
        for link in download_links(&config.public_url, &game) {
            println!("    {:<8} {}", link.label, link.url);
        }
    }
    println!();
}

async fn add_game(pool: &DbPool, config: &Config, username: &str, new_game: NewGame) {
    let owner = match pool.get_user_by_username(username).await {
        Ok(Some(u)) => u,
        Ok(None) => {
            eprintln!("User '{}' not found.", username);
            std::process::exit(1);
        }
        Err(e) => {
            eprintln!("Error loading user: {}", e);
            std::process::exit(1);
        }
    };

    let analytics = build_notifier(&config.analytics);
    let result = catalog::create_game(pool, analytics.notifier(), &owner, new_game).await;
    // Flush the "Create Game" event before exiting.
    analytics.shutdown().await;

    match result {
        Ok(game) => {
            println!("Game '{}' created with uuid {}.", game.slug, game.uuid);
            for link in download_links(&config.public_url, &game) {
                println!("    {:<8} {}", link.label, link.url);
            }
        }
        Err(e) => {
            eprintln!("Error creating game: {}", e);
            std::process::exit(1);
        }
    }
}

fn print_usage() {
    eprintln!();
    eprintln!("Usage: manage-catalog <command> [options]");
    eprintln!();
    eprintln!("Commands:");
    eprintln!("  add-user --username <name>     Create a user account");
    eprintln!("  add-framework --name <name>    Register a game framework");
    eprintln!("  list-frameworks                List registered frameworks");
    eprintln!("  list-games <username>          List a user's games and download links");
    eprintln!("  add-game <username> --slug <slug> --name <name> --framework <id> [--public]");
    eprintln!("                                 Register a game for a user");
    eprintln!("  help                           Show this help");
    eprintln!();
    eprintln!("Examples:");
    eprintln!("  manage-catalog add-framework --name LOVE");
    eprintln!("  manage-catalog list-games stabyourself");
    eprintln!("  manage-catalog add-game stabyourself --slug mari0 --name Mari0 --framework 1");
    eprintln!();
}
