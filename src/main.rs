use std::io::{self, BufRead, Write};

use mission_shell::demo::demo_mission;
use mission_shell::MissionSession;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let mission = demo_mission();
    println!("=== {} ===", mission.title);
    println!("Type 'help' for commands, 'hint' when stuck, 'exit' to quit.");
    println!();

    let mut session = MissionSession::new(&mission);
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        print!("{} $ ", session.state().current_directory);
        let _ = stdout.flush();

        let mut input = String::new();
        match stdin.lock().read_line(&mut input) {
            Ok(0) | Err(_) => break,
            Ok(_) => {}
        }
        let input = input.trim();
        if input == "exit" {
            break;
        }

        for line in session.handle_input(input) {
            println!("{}", line);
        }
        println!();

        if session.mission_completed() {
            println!("Mission Complete!");
            println!("Great work, Detective.");
            break;
        }
    }
}
