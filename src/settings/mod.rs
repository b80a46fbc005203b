use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "Matsync")]
#[command(version)]
#[command(about = "Reconciles an object-info export against an asset repository")]
pub struct CliArgs {
    #[arg(long, env = "MATSYNC_OBJECT_INFO", default_value_t = default_object_info())]
    pub object_info: String,

    #[arg(long, env = "MATSYNC_SOURCE_ROOT", default_value_t = default_source_root())]
    pub source_root: String,

    #[arg(long, env = "MATSYNC_REPOSITORY_ROOT", default_value_t = default_repository_root())]
    pub repository_root: String,

    #[arg(long, env = "MATSYNC_IMAGE_EXTENSION", default_value = "png")]
    pub image_extension: String,
}

fn cwd_joined(segment: &str) -> String {
    std::env::current_dir()
        .expect("Can't read current working directory!")
        .join(segment)
        .to_string_lossy()
        .to_string()
}

pub fn default_object_info() -> String {
    cwd_joined("ObjectInfo.json")
}

pub fn default_source_root() -> String {
    cwd_joined("Content")
}

pub fn default_repository_root() -> String {
    cwd_joined("_repository")
}
