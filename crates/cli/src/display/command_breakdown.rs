use phdf_runner_core::{CommandBuilder, Payload};

const PREVIEW_CHARS: usize = 60;

pub fn print_command_breakdown(command: &CommandBuilder, payload: &Payload) {
    println!("   🔧 Command breakdown:");
    println!("      • interpreter: {}", command.interpreter());
    println!("      • script: {}", display_token(command.script()));

    match payload {
        Payload::Inline(text) => {
            println!("      • payload: inline, {} bytes", text.len());
            println!("      • preview: {}", payload_preview(text));
        }
        Payload::File(path) => {
            println!("      • payload: file {}", path.display());
        }
    }

    if let Some(target_dir) = command.current_command().last() {
        println!("      • output dir: {}", display_token(target_dir));
    }
}

/// Blank tokens are still passed to phdf, so show them explicitly
fn display_token(token: &str) -> &str {
    if token.is_empty() { "(empty)" } else { token }
}

/// First line of the payload, cut to a readable width
pub fn payload_preview(text: &str) -> String {
    let first_line = text.lines().next().unwrap_or("");
    let mut preview: String = first_line.chars().take(PREVIEW_CHARS).collect();
    if first_line.chars().count() > PREVIEW_CHARS || text.lines().nth(1).is_some() {
        preview.push('…');
    }
    preview
}
