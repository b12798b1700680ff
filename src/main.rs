use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use gt::areas::repository::Repository;
use gt::artifacts::objects::object_type::ObjectType;
use gt::commands::plumbing::cat_file::CatFileMode;
use gt::config::{self, Config};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter
const LOG_ENV: &str = "GT_LOG";

#[derive(Parser)]
#[command(
    name = "gt",
    version = "0.1.0",
    about = "A minimal content-addressed version control tool",
    long_about = "gt stores file contents as compressed, SHA-1 addressed objects, \
    tracks the working tree in a checksummed index and records snapshots as tree \
    and commit objects.",
    help_template = r"
{name} {version} - {about}

USAGE:
    {usage}

OPTIONS:
    {all-args}
",
)]
struct Cli {
    #[arg(
        long,
        global = true,
        env = config::DIRECTORY_ENV,
        default_value = config::DEFAULT_DIRECTORY,
        help = "The repository directory"
    )]
    directory: PathBuf,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum TypeArg {
    Blob,
    Tree,
    Commit,
}

impl From<TypeArg> for ObjectType {
    fn from(value: TypeArg) -> Self {
        match value {
            TypeArg::Blob => ObjectType::Blob,
            TypeArg::Tree => ObjectType::Tree,
            TypeArg::Commit => ObjectType::Commit,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    #[command(
        name = "init",
        about = "Initialize a new repository",
        long_about = "This command creates the repository directory and its object store."
    )]
    Init,
    #[command(
        name = "hash-object",
        about = "Hash an object and optionally write it to the object database",
        long_about = "This command hashes the content of a file, or of standard input when \
        no file is given, and can write it to the object database."
    )]
    HashObject {
        #[arg(short, long, help = "Write the object to the object database")]
        write: bool,
        #[arg(short = 't', long = "type", value_enum, default_value = "blob", help = "The object type")]
        object_type: TypeArg,
        #[arg(index = 1, help = "The file to hash (standard input when omitted)")]
        file: Option<PathBuf>,
    },
    #[command(
        name = "cat-file",
        about = "Print the content of an object",
        long_about = "This command prints the payload of an object, its type, \
        or a readable listing for trees."
    )]
    CatFile {
        #[arg(short = 't', conflicts_with = "pretty", help = "Print the object type")]
        show_type: bool,
        #[arg(short = 'p', long, help = "Pretty-print the object")]
        pretty: bool,
        #[arg(index = 1, help = "The object SHA")]
        sha: String,
    },
    #[command(
        name = "update-index",
        about = "Add files to the index",
        long_about = "This command stores each file as a blob and records it in the index. \
        Files that cannot be added are reported and skipped."
    )]
    UpdateIndex {
        #[arg(short, long, required = true, help = "Add the files to the index")]
        add: bool,
        #[arg(short, long, help = "Print the object ID of every added file")]
        verbose: bool,
        #[arg(index = 1, required = true, num_args = 1.., help = "The files to add")]
        files: Vec<PathBuf>,
    },
    #[command(name = "ls-files", about = "List the files in the index")]
    LsFiles,
    #[command(name = "write-tree", about = "Write the index as a tree object")]
    WriteTree,
    #[command(
        name = "commit-tree",
        about = "Create a commit object for a tree",
        long_about = "This command writes a commit for the given tree. \
        The message is read from standard input unless -m is given."
    )]
    CommitTree {
        #[arg(index = 1, help = "The tree SHA")]
        tree: String,
        #[arg(short, long = "parent", help = "A parent commit SHA (repeatable)")]
        parents: Vec<String>,
        #[arg(short, long, help = "The commit message")]
        message: Option<String>,
    },
    #[command(
        name = "add",
        about = "Add files and directories to the index",
        long_about = "This command adds files to the index, walking directories recursively."
    )]
    Add {
        #[arg(index = 1, required = true, num_args = 1.., help = "The paths to add")]
        paths: Vec<PathBuf>,
    },
    #[command(
        name = "commit",
        about = "Create a new commit with the specified message",
        long_about = "This command commits the index on top of HEAD and moves HEAD to the new commit."
    )]
    Commit {
        #[arg(short, long, help = "The commit message")]
        message: String,
    },
    #[command(
        name = "diff",
        about = "Show changes between the index and the working tree",
        long_about = "This command shows tracked files whose metadata changed since they were added, \
        as a unified diff against the indexed content."
    )]
    Diff,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let pwd = std::env::current_dir()?;
    let repository = Repository::new(
        &pwd,
        Config::new(cli.directory),
        Box::new(std::io::stdout()),
    );

    match cli.command {
        Commands::Init => repository.init()?,
        Commands::HashObject {
            write,
            object_type,
            file,
        } => repository.hash_object(file.as_deref(), object_type.into(), write)?,
        Commands::CatFile {
            show_type,
            pretty,
            sha,
        } => {
            let mode = match (show_type, pretty) {
                (true, _) => CatFileMode::Type,
                (_, true) => CatFileMode::Pretty,
                _ => CatFileMode::Raw,
            };
            repository.cat_file(&sha, mode)?
        }
        Commands::UpdateIndex { verbose, files, .. } => repository.update_index(&files, verbose)?,
        Commands::LsFiles => repository.ls_files()?,
        Commands::WriteTree => repository.write_tree()?,
        Commands::CommitTree {
            tree,
            parents,
            message,
        } => repository.commit_tree(&tree, &parents, message.as_deref())?,
        Commands::Add { paths } => repository.add(&paths)?,
        Commands::Commit { message } => repository.commit(&message)?,
        Commands::Diff => repository.diff()?,
    }

    repository.writer().flush()?;

    Ok(())
}
