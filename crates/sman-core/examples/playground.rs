// crates/sman-core/examples/playground.rs
// Run with: cargo run --example playground

use sman_core::{SearchQuery, Snippet, SnippetCollection, TagExpression, parse_command};

fn main() {
    println!("🗂️ sman Playground\n");

    // Placeholder parsing
    println!("=== Placeholders ===");
    let command = "docker exec -it <<container#container id>> <<shell(bash,sh)>> -c <<shell>>";
    for placeholder in parse_command(command) {
        println!(
            "{:<10} desc={:?} options={:?} patterns={}",
            placeholder.name,
            placeholder.description_text(),
            placeholder.options,
            placeholder.patterns.len()
        );
    }

    // Substitution
    println!("\n=== Substitution ===");
    let mut snippet = Snippet::new("exec", command);
    snippet.set_input("container", "web");
    snippet.set_input("shell", "sh");
    snippet.replace_placeholders();
    println!("{}", snippet.command);

    // Tag expressions
    println!("\n=== Tag Expressions ===");
    let tags = vec!["docker".to_string(), "debug".to_string()];
    for expression in ["docker", "docker+debug", "net,debug", "net+debug", ""] {
        let parsed = TagExpression::parse(expression);
        println!("{:<14} -> {}", format!("{:?}", expression), parsed.matches(&tags));
    }

    // Search
    println!("\n=== Search ===");
    let collection: SnippetCollection = vec![
        Snippet::new("ps", "docker ps -a").with_file("docker").with_tags(["docker"]),
        Snippet::new("logs", "docker logs -f <<c>>")
            .with_file("docker")
            .with_tags(["docker", "debug"]),
        Snippet::new("st", "git status").with_file("git").with_tags(["git"]),
    ]
    .into();

    let queries = [
        SearchQuery::new(""),
        SearchQuery::new("logs|status"),
        SearchQuery::new("").with_tags("debug,git"),
        SearchQuery::new("").with_file("git"),
        SearchQuery::new("("),
    ];
    for query in &queries {
        match collection.search(query) {
            Ok(found) => {
                let names: Vec<String> = found.iter().map(|s| format!("{}/{}", s.file, s.name)).collect();
                println!("{:?} -> {:?}", query, names);
            }
            Err(e) => println!("{:?} -> error: {}", query, e),
        }
    }
}
