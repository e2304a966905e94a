use std::{env, env::VarError};

/// There's no real CLI for the server, so just do quick 'n dirty
pub fn handle_command_line_args() -> bool {
    let has_cli_args = env::args().count() > 1;
    if has_cli_args {
        // We don't expect any CLI args, so always print the help
        display_readme();
        display_envs();
    }
    has_cli_args
}

fn display_readme() {
    const README: &str = include_str!("./cli-help.txt");
    println!("\n{README}\n");
}

fn display_envs() {
    // CPB_WEBHOOK_SECRET and CPB_UTMIFY_API_TOKEN are deliberately absent
    const DISPLAY_ENVS: [&str; 15] = [
        "RUST_LOG",
        "CPB_HOST",
        "CPB_PORT",
        "PORT",
        "CPB_REQUIRE_SIGNATURE",
        "CPB_PLATFORM_TAG",
        "CPB_INCLUDE_COMMISSION",
        "CPB_FEE_RATIO",
        "CPB_CURRENCY",
        "CPB_CUSTOMER_COUNTRY",
        "CPB_USE_X_FORWARDED_FOR",
        "CPB_USE_FORWARDED",
        "CPB_UTMIFY_API_URL",
        "CPB_UTMIFY_TIMEOUT_SECS",
        "CPB_WORKERS",
    ];

    println!("Current environment values (EXCLUDING variables that contain secrets):");
    DISPLAY_ENVS.iter().for_each(|&name| {
        let val = match env::var(name) {
            Ok(s) => s,
            Err(VarError::NotPresent) => "Not set".into(),
            Err(VarError::NotUnicode(s)) => format!("Invalid value: {}", s.to_string_lossy()),
        };
        println!("  {name:<35} {val:<15}");
    })
}
