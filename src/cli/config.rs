use std::fs;
use std::path::PathBuf;

pub fn init(stdout: bool) -> Result<(), Box<dyn std::error::Error>> {
    let config_content = crate::config::generate::generate_starter_settings();

    if stdout {
        print!("{}", config_content);
        return Ok(());
    }

    // Try ~/.config/flowrelay/config.yml first, falling back to /etc.
    let config_path = if let Some(home_dir) = dirs::home_dir() {
        let user_config = home_dir.join(".config/flowrelay/config.yml");

        match user_config.parent() {
            Some(parent) if fs::create_dir_all(parent).is_ok() => Some(user_config),
            _ => {
                eprintln!("Warning: could not create user config directory");
                eprintln!("Falling back to /etc/flowrelay/config.yml");
                None
            }
        }
    } else {
        None
    };

    let config_path = config_path.unwrap_or_else(|| PathBuf::from("/etc/flowrelay/config.yml"));

    if config_path.exists() {
        eprintln!(
            "Error: Config file already exists at {}",
            config_path.display()
        );
        eprintln!("Remove it first or use --stdout to print the config");
        std::process::exit(1);
    }

    if let Some(parent) = config_path.parent() {
        fs::create_dir_all(parent)?;
    }

    fs::write(&config_path, config_content)?;

    println!("Config file written to {}", config_path.display());
    Ok(())
}
