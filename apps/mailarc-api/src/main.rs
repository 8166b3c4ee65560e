use clap::Parser;

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
	color_eyre::install()?;
	let args = mailarc_api::Args::parse();
	mailarc_api::run(args).await
}
