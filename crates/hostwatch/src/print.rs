use clap::CommandFactory;
use crate::config::Args;

pub fn print_usage() {
    println!("{}", usage());
}

fn usage() -> String {
    let cmd = Args::command();
    let name = cmd.get_name();
    format!(
        "Usage: {name} <hostname or IP address>\n\nExamples:\n  {name} google.com\n  {name} 8.8.8.8\n  {name} 2001:4860:4860::8888"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_usage() {
        let expected = "\
Usage: hostwatch <hostname or IP address>

Examples:
  hostwatch google.com
  hostwatch 8.8.8.8
  hostwatch 2001:4860:4860::8888";
        assert_eq!(expected, usage());
    }
}
