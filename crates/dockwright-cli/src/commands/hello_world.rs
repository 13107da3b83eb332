use dockwright::{Image, Instructions};

use super::Example;

/// The smallest possible image: `FROM hello-world`, built and run.
pub async fn hello_world(example: Example) -> anyhow::Result<()> {
    let config = example.load_config()?;
    let (serialize, build, run) = super::options(&config);

    let mut image =
        Image::from_config(example.tag_or("dockwright-example"), &config).from("hello-world");

    image.serialize(&serialize)?;
    if example.dockerfile_only {
        println!("Wrote {}", serialize.output_file.display());
        return Ok(());
    }

    image.build_image(build).await?;
    image.run_image(run).await?;
    Ok(())
}
