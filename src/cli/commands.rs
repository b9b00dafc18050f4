use std::fs;
use std::io::{self, BufRead};
use std::path::Path;
use std::sync::Arc;

use anyhow::{anyhow, bail, Context, Result};
use tracing::debug;

use crate::api::types::{ExhibitPayload, UserProfile, UserRegister};
use crate::api::{ApiClient, ApiError, ListParams};
use crate::config::Config;
use crate::model::{mime_for_extension, Document, StagedImage};
use crate::persistence::{load_exhibition, ExhibitionPublisher, SaveOutcome};
use crate::session::{FileSessionStore, SecureString, Session};
use crate::ui::editor::DocumentEditor;
use crate::ui::render::{render_document, render_header, to_plain_text, RenderMode};

use super::draft::Draft;
use super::{Cli, Command, ExhibitionsCommand, ExhibitsCommand, OrgsCommand, ProfileCommand};

struct App {
    config: Config,
    client: ApiClient,
    session: Session,
}

/// Execute a parsed command line.
pub async fn run(cli: Cli) -> Result<()> {
    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    let client = ApiClient::new(&config.api)?;
    let session_path = config
        .session
        .path
        .clone()
        .unwrap_or_else(FileSessionStore::default_path);
    let session = Session::new(Arc::new(FileSessionStore::open(session_path)?));
    debug!(base_url = %client.base_url(), "backend configured");

    let ctx = App {
        config,
        client,
        session,
    };

    match cli.command {
        Command::Login { username, password } => login(&ctx, &username, password).await,
        Command::Logout => {
            ctx.session.logout()?;
            println!("Logged out.");
            Ok(())
        }
        Command::Signup {
            email,
            password,
            full_name,
        } => signup(&ctx, email, password, full_name).await,
        Command::Profile(command) => profile(&ctx, command).await,
        Command::Orgs(command) => orgs(&ctx, command).await,
        Command::Exhibitions(command) => exhibitions(&ctx, command).await,
        Command::Exhibits(command) => exhibits(&ctx, command).await,
    }
}

async fn login(ctx: &App, username: &str, password: Option<String>) -> Result<()> {
    let password = password_or_stdin(password)?;
    let token = ctx
        .client
        .login(username, &password)
        .await
        .map_err(failed("log in"))?;
    ctx.session.set_token(&token.access_token)?;
    println!("Logged in as {}.", username);
    Ok(())
}

async fn signup(
    ctx: &App,
    email: String,
    password: Option<String>,
    full_name: Option<String>,
) -> Result<()> {
    let password = password_or_stdin(password)?;
    let user = ctx
        .client
        .signup(&UserRegister {
            email,
            password,
            full_name,
        })
        .await
        .map_err(failed("create the account"))?;
    println!("Account created for {} ({}).", user.email, user.id);
    Ok(())
}

async fn profile(ctx: &App, command: ProfileCommand) -> Result<()> {
    let token = ctx
        .session
        .require_token()
        .map_err(failed("view the profile"))?;
    match command {
        ProfileCommand::Show => {
            let profile = ctx
                .client
                .profile(&token)
                .await
                .map_err(failed("load the profile"))?;
            print_profile(&ctx.client, &profile);
        }
        ProfileCommand::Update {
            full_name,
            about,
            avatar,
        } => {
            let mut profile = ctx
                .client
                .profile(&token)
                .await
                .map_err(failed("load the profile"))?;
            if let Some(full_name) = full_name {
                profile.full_name = Some(full_name);
            }
            if let Some(about) = about {
                profile.about = Some(about);
            }
            if let Some(path) = avatar {
                let image = stage_file(&path)?;
                let upload = ctx
                    .client
                    .upload_image(
                        &ctx.config.uploads.profile_prefix,
                        &image,
                        "avatar",
                        Some(&token),
                    )
                    .await
                    .map_err(failed("upload the avatar"))?;
                profile.avatar_key = Some(upload.object_key);
            }
            let profile = ctx
                .client
                .update_profile(&profile, &token)
                .await
                .map_err(failed("update the profile"))?;
            print_profile(&ctx.client, &profile);
        }
    }
    Ok(())
}

fn print_profile(client: &ApiClient, profile: &UserProfile) {
    println!("Name:   {}", profile.full_name.as_deref().unwrap_or("-"));
    println!("About:  {}", profile.about.as_deref().unwrap_or("-"));
    match profile.avatar_key.as_deref() {
        Some(key) => println!("Avatar: {}", client.file_url(key)),
        None => println!("Avatar: -"),
    }
}

async fn orgs(ctx: &App, command: OrgsCommand) -> Result<()> {
    let token = ctx
        .session
        .require_token()
        .map_err(failed("list organizations"))?;
    match command {
        OrgsCommand::List => {
            let selected = ctx.session.selected_organization();
            let memberships = ctx
                .client
                .my_organizations(&token)
                .await
                .map_err(failed("list organizations"))?;
            for membership in memberships {
                let org = membership.organization;
                let marker = if selected.as_deref() == Some(org.id.to_string().as_str()) {
                    "*"
                } else {
                    " "
                };
                println!(
                    "{} {}  {}  {}",
                    marker,
                    org.id,
                    org.name,
                    membership.role.as_deref().unwrap_or("")
                );
            }
        }
        OrgsCommand::Select { id } => {
            let memberships = ctx
                .client
                .my_organizations(&token)
                .await
                .map_err(failed("select the organization"))?;
            let Some(membership) = memberships
                .iter()
                .find(|m| m.organization.id.to_string() == id)
            else {
                bail!("You are not a member of organization {}", id);
            };
            ctx.session.select_organization(&id)?;
            println!("Selected {}.", membership.organization.name);
        }
    }
    Ok(())
}

async fn exhibitions(ctx: &App, command: ExhibitionsCommand) -> Result<()> {
    match command {
        ExhibitionsCommand::List { skip, limit } => {
            let token = ctx.session.token();
            let exhibitions = ctx
                .client
                .list_exhibitions(ListParams { skip, limit }, token.as_ref())
                .await
                .map_err(failed("list exhibitions"))?;
            for exhibition in exhibitions {
                println!(
                    "{}  {}  [{}]",
                    exhibition.id,
                    exhibition.title,
                    exhibition.status.as_deref().unwrap_or("-")
                );
            }
        }
        ExhibitionsCommand::Show { id } => {
            let token = ctx
                .session
                .require_token()
                .map_err(failed("load the exhibition"))?;
            let document = load_exhibition(&ctx.client, id, &token)
                .await
                .map_err(failed("load the exhibition"))?;
            print_document(&document, RenderMode::ReadOnly);
        }
        ExhibitionsCommand::Preview { draft } => {
            let editor = load_draft(ctx, &draft)?;
            print_document(editor.document(), RenderMode::Editable);
        }
        ExhibitionsCommand::Publish { draft } => {
            let editor = load_draft(ctx, &draft)?;
            let publisher =
                ExhibitionPublisher::new(ctx.client.clone(), ctx.session.clone(), &ctx.config);
            match publisher.save(editor.document()).await {
                Ok(SaveOutcome::Saved {
                    exhibition_id,
                    blocks_created,
                }) => {
                    Draft::record_id(&draft, exhibition_id)?;
                    println!(
                        "Published exhibition {} with {} block(s).",
                        exhibition_id, blocks_created
                    );
                }
                Ok(SaveOutcome::Skipped) => println!("A save is already in progress."),
                Err(err) => bail!(err.user_message()),
            }
        }
    }
    Ok(())
}

async fn exhibits(ctx: &App, command: ExhibitsCommand) -> Result<()> {
    match command {
        ExhibitsCommand::List { skip, limit } => {
            let exhibits = ctx
                .client
                .list_exhibits(ListParams { skip, limit })
                .await
                .map_err(failed("list exhibits"))?;
            for exhibit in exhibits {
                println!("{}  {}", exhibit.id, exhibit.title);
            }
        }
        ExhibitsCommand::Show { id } => {
            let exhibit = ctx
                .client
                .get_exhibit(id)
                .await
                .map_err(failed("load the exhibit"))?;
            println!("{}", exhibit.title);
            if let Some(description) = exhibit.description.as_deref() {
                println!("{}", description);
            }
            if let Some(key) = exhibit.image_key.as_deref() {
                println!("Image: {}", ctx.client.file_url(key));
            }
        }
        ExhibitsCommand::Create {
            title,
            description,
            image,
        } => {
            let token = ctx.session.token();
            let image_key = upload_exhibit_image(ctx, image.as_deref(), token.as_ref()).await?;
            let exhibit = ctx
                .client
                .create_exhibit(
                    &ExhibitPayload {
                        title,
                        description,
                        image_key,
                    },
                    token.as_ref(),
                )
                .await
                .map_err(failed("create the exhibit"))?;
            println!("Created exhibit {}.", exhibit.id);
        }
        ExhibitsCommand::Update {
            id,
            title,
            description,
            image,
        } => {
            let token = ctx
                .session
                .require_token()
                .map_err(failed("update the exhibit"))?;
            let image_key = upload_exhibit_image(ctx, image.as_deref(), Some(&token)).await?;
            let exhibit = ctx
                .client
                .update_exhibit(
                    id,
                    &ExhibitPayload {
                        title,
                        description,
                        image_key,
                    },
                    &token,
                )
                .await
                .map_err(failed("update the exhibit"))?;
            println!("Updated exhibit {}.", exhibit.id);
        }
        ExhibitsCommand::Delete { id } => {
            let token = ctx
                .session
                .require_token()
                .map_err(failed("delete the exhibit"))?;
            let message = ctx
                .client
                .delete_exhibit(id, &token)
                .await
                .map_err(failed("delete the exhibit"))?;
            println!("{}", message);
        }
    }
    Ok(())
}

async fn upload_exhibit_image(
    ctx: &App,
    path: Option<&Path>,
    token: Option<&SecureString>,
) -> Result<Option<String>> {
    let Some(path) = path else {
        return Ok(None);
    };
    let image = stage_file(path)?;
    let upload = ctx
        .client
        .upload_image(&ctx.config.uploads.exhibit_prefix, &image, "exhibit", token)
        .await
        .map_err(failed("upload the exhibit image"))?;
    Ok(Some(upload.object_key))
}

fn load_draft(ctx: &App, path: &Path) -> Result<DocumentEditor> {
    let base_dir = path.parent().unwrap_or_else(|| Path::new("."));
    let editor = Draft::load(path)?.into_editor(base_dir, ctx.client.base_url())?;
    Ok(editor)
}

fn print_document(document: &Document, mode: RenderMode) {
    let header = render_header(document);
    for line in header.lines {
        let text: String = line.spans.iter().map(|s| s.content.as_ref()).collect();
        println!("{}", text);
    }
    println!();
    println!("{}", to_plain_text(&render_document(document, mode)));
}

/// Map a backend failure to the generic message for `action`.
fn failed(action: &'static str) -> impl FnOnce(ApiError) -> anyhow::Error {
    move |err| {
        debug!(error = %err, action, "request failed");
        anyhow!(err.user_message(action))
    }
}

fn stage_file(path: &Path) -> Result<StagedImage> {
    let mime = path
        .extension()
        .and_then(|ext| ext.to_str())
        .and_then(mime_for_extension)
        .ok_or_else(|| anyhow!("Unsupported image file '{}'", path.display()))?;
    let bytes =
        fs::read(path).with_context(|| format!("Failed to read '{}'", path.display()))?;
    Ok(StagedImage::from_bytes(&bytes, mime))
}

fn password_or_stdin(password: Option<String>) -> Result<String> {
    if let Some(password) = password {
        return Ok(password);
    }
    eprint!("Password: ");
    let mut line = String::new();
    io::stdin()
        .lock()
        .read_line(&mut line)
        .context("Failed to read password from stdin")?;
    let password = line.trim_end_matches(['\r', '\n']).to_string();
    if password.is_empty() {
        bail!("Password must not be empty");
    }
    Ok(password)
}
