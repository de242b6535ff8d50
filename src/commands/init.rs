use crate::{
    InitArgs,
    config::{Config, HighlightConfig, MarkdownConfig, SiteConfig},
};

const STARTER_TEMPLATE: &str = r#"<!doctype html>
<html>
  <head>
    <meta charset="utf-8">
    <title>{{ site.name }}</title>
    <link rel="stylesheet" href="highlight.css">
  </head>
  <body>
{% filter markdown %}
# {{ site.name }}

Welcome to your new site. Edit `templates/index.html` and run `mdpress build`.

```rust:src/main.rs
fn main() {
    println!("hello");
}
```
{% endfilter %}
  </body>
</html>
"#;

pub async fn run(args: &InitArgs) -> Result<(), anyhow::Error> {
    let path = if args.path.is_relative() {
        std::env::current_dir()?.join(&args.path)
    } else {
        args.path.clone()
    };

    if !path.exists() {
        if args.create {
            tokio::fs::create_dir_all(&path).await?;
            println!("Created directory {path}", path = path.display());
        } else {
            return Err(anyhow::anyhow!(
                "Directory does not exist: {path}",
                path = path.display()
            ));
        }
    }

    let default_config = Config {
        site: SiteConfig {
            name: "My Site".into(),
            url: None,
            template: "index.html".into(),
            output: "dist".into(),
        },
        templates: "templates".into(),
        markdown: MarkdownConfig::default(),
        highlight: HighlightConfig::default(),
    };

    println!("Initializing project in {}", path.display());

    let config_text = serde_yaml::to_string(&default_config)?;
    tokio::fs::write(path.join("mdpress.yaml"), config_text).await?;

    println!(
        "Created config file {config_file}",
        config_file = path.join("mdpress.yaml").display()
    );

    let templates_dir = path.join("templates");
    tokio::fs::create_dir_all(&templates_dir).await?;
    tokio::fs::write(templates_dir.join("index.html"), STARTER_TEMPLATE).await?;

    println!(
        "Created starter template {template}",
        template = templates_dir.join("index.html").display()
    );

    Ok(())
}
