//! Chat front-end: turns Telegram updates into raffle operations and replies.

use std::time::SystemTime;

use tracing::{debug, error, warn};

use crate::{
    dto::{
        format_system_time,
        telegram::{ChatId, Message, Update, UserId},
    },
    error::ServiceError,
    services::{
        csv_export::{CSV_FILE_NAME, CSV_MIME_TYPE, render_participants_csv},
        raffle_service::{DrawOutcome, ExportOutcome, RegistrationOutcome},
    },
    state::SharedState,
    telegram::OutgoingDocument,
};

/// Reply to `/start`.
pub const START_PROMPT: &str = "Введи свой email для участия в розыгрыше:";
/// Reply to text that is not an email.
pub const INVALID_EMAIL: &str = "Похоже, это не email. Попробуй ещё раз.";
/// Reply to a repeated registration.
pub const ALREADY_REGISTERED: &str = "Этот email уже зарегистрирован.";
/// Reply to admin commands from anyone else.
pub const COMMAND_UNAVAILABLE: &str = "Команда недоступна.";
/// Reply to a draw with nobody registered.
pub const NO_PARTICIPANTS: &str = "Пока нет участников.";
/// Reply to an export with nobody registered.
pub const EXPORT_EMPTY: &str = "Список участников пуст.";
/// Reply when the participant store fails.
pub const TRY_AGAIN_LATER: &str = "Сервис временно недоступен, попробуй позже.";

fn registered_reply(code: &str) -> String {
    format!("Ты успешно зарегистрирован! Твой ID для розыгрыша: {code}. Почта не будет показана никому.")
}

fn winner_reply(code: &str) -> String {
    format!("Победитель: {code}")
}

/// Commands the bot understands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BotCommand {
    /// Ask for an email.
    Start,
    /// Admin-only random draw.
    Raffle,
    /// Admin-only CSV export.
    Export,
    /// Any other command, by lowercased name.
    Unknown(String),
}

/// Classified chat input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BotInput {
    /// A `/command`.
    Command(BotCommand),
    /// Anything that is not a command is an email candidate.
    Text(String),
}

impl BotInput {
    /// Classify raw message text.
    ///
    /// `/cmd@SomeBot args` is read as `cmd`; command names are case-insensitive.
    pub fn parse(text: &str) -> Self {
        let trimmed = text.trim_start();
        let Some(rest) = trimmed.strip_prefix('/') else {
            return BotInput::Text(text.to_owned());
        };

        let token = rest.split_whitespace().next().unwrap_or_default();
        let name = token
            .split_once('@')
            .map_or(token, |(name, _bot)| name)
            .to_ascii_lowercase();

        BotInput::Command(match name.as_str() {
            "start" => BotCommand::Start,
            "raffle" => BotCommand::Raffle,
            "export" => BotCommand::Export,
            _ => BotCommand::Unknown(name),
        })
    }
}

/// What to send back to the chat.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// A text message.
    Text(String),
    /// A file upload.
    Document(OutgoingDocument),
    /// Nothing is sent.
    Silent,
}

/// Process one update end to end, delivering the reply if there is one.
///
/// Failures never escape: store errors become a generic reply and delivery
/// errors are logged.
pub async fn handle_update(state: &SharedState, update: Update) {
    let update_id = update.update_id;
    let Some(Message {
        chat, from, text, ..
    }) = update.message
    else {
        debug!(update_id, "ignoring update without message");
        return;
    };
    let Some(text) = text else {
        debug!(update_id, "ignoring message without text");
        return;
    };

    let caller = from.map(|user| user.id);
    let reply = match respond(state, BotInput::parse(&text), caller).await {
        Ok(reply) => reply,
        Err(err) => {
            error!(update_id, error = %err, "failed to handle update");
            Reply::Text(TRY_AGAIN_LATER.to_owned())
        }
    };

    deliver(state, chat.id, reply).await;
}

/// Run the raffle operation behind `input` and render its outcome.
pub async fn respond(
    state: &SharedState,
    input: BotInput,
    caller: Option<UserId>,
) -> Result<Reply, ServiceError> {
    let raffle = state.raffle();
    match input {
        BotInput::Text(text) => Ok(match raffle.register(&text).await? {
            RegistrationOutcome::Registered(code) => Reply::Text(registered_reply(code.as_str())),
            RegistrationOutcome::AlreadyRegistered => Reply::Text(ALREADY_REGISTERED.to_owned()),
            RegistrationOutcome::Invalid => Reply::Text(INVALID_EMAIL.to_owned()),
        }),
        BotInput::Command(BotCommand::Start) => Ok(Reply::Text(START_PROMPT.to_owned())),
        BotInput::Command(BotCommand::Raffle) => {
            let is_admin = state.admin_policy().is_admin(caller);
            Ok(match raffle.draw_winner(is_admin).await? {
                DrawOutcome::Winner(code) => Reply::Text(winner_reply(code.as_str())),
                DrawOutcome::NoParticipants => Reply::Text(NO_PARTICIPANTS.to_owned()),
                DrawOutcome::Unauthorized => {
                    debug!(?caller, "draw refused");
                    Reply::Text(COMMAND_UNAVAILABLE.to_owned())
                }
            })
        }
        BotInput::Command(BotCommand::Export) => {
            let is_admin = state.admin_policy().is_admin(caller);
            Ok(match raffle.export_all(is_admin).await? {
                ExportOutcome::Rows(rows) => Reply::Document(OutgoingDocument {
                    file_name: CSV_FILE_NAME.to_owned(),
                    mime_type: CSV_MIME_TYPE,
                    bytes: render_participants_csv(&rows).into_bytes(),
                    caption: Some(format!(
                        "Участников: {} ({})",
                        rows.len(),
                        format_system_time(SystemTime::now())
                    )),
                }),
                ExportOutcome::Empty => Reply::Text(EXPORT_EMPTY.to_owned()),
                ExportOutcome::Unauthorized => {
                    debug!(?caller, "export refused");
                    Reply::Text(COMMAND_UNAVAILABLE.to_owned())
                }
            })
        }
        BotInput::Command(BotCommand::Unknown(name)) => {
            debug!(command = %name, "ignoring unknown command");
            Ok(Reply::Silent)
        }
    }
}

async fn deliver(state: &SharedState, chat_id: ChatId, reply: Reply) {
    let telegram = state.telegram();
    let result = match reply {
        Reply::Text(text) => telegram.send_message(chat_id, text).await,
        Reply::Document(document) => telegram.send_document(chat_id, document).await,
        Reply::Silent => return,
    };

    if let Err(err) = result {
        warn!(chat_id, error = %err, "failed to deliver reply");
    }
}
