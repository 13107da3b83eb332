use dockwright::{Image, Instructions};

use super::Example;

const RULE: &str = "---------------------";

/// The whalesay tutorial image: fortunes piped through cowsay.
pub async fn whalesay(example: Example) -> anyhow::Result<()> {
    let config = example.load_config()?;
    let (serialize, build, run) = super::options(&config);

    let mut image = Image::from_config(example.tag_or("dockwright-whalesay"), &config)
        .from_tag("docker/whalesay", "latest")
        .run("apt-get -y update && apt-get install -y fortunes")
        .cmd("/usr/games/fortune -a | cowsay");

    let contents = image.serialize(&serialize)?;
    println!("{RULE}");
    println!("Generated Dockerfile:");
    println!("{contents}");
    println!("{RULE}");

    if example.dockerfile_only {
        return Ok(());
    }

    let details = image.build_image(build).await?;
    println!("{RULE}");
    println!("Image Built:");
    println!("{}", serde_json::to_string_pretty(&details)?);
    println!("{RULE}");

    image.run_image(run).await?;
    Ok(())
}
