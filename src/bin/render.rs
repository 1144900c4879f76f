use std::io::{self, Read};

fn main() {
    let mut markdown = String::new();
    io::stdin().read_to_string(&mut markdown).expect("read stdin");
    let html = reddit_markdown::parse_markdown(&markdown);
    println!("{html}");
}
