//! Support ticket commands.

use clap::Subcommand;
use ridextra_admin::{AdminError, TicketReply};
use ridextra_core::{TicketId, TicketStatus};

use super::{Context, ListArgs};
use crate::output;

#[derive(Debug, Subcommand)]
pub enum TicketsAction {
    /// List tickets
    List {
        #[command(flatten)]
        list: ListArgs,
    },
    /// Show one ticket
    Show {
        /// Ticket ID
        id: String,
    },
    /// Change a ticket's status
    Status {
        /// Ticket ID
        id: String,
        /// New status: pending, in-progress, completed or cancelled
        status: TicketStatus,
    },
    /// Email a reply to the ticket's author
    Reply {
        /// Ticket ID
        id: String,
        /// Reply text
        #[arg(short, long)]
        message: String,
        /// Subject line
        #[arg(short, long, default_value = "Re: your support request")]
        subject: String,
        /// Recipient; defaults to the ticket's email
        #[arg(short, long)]
        email: Option<String>,
    },
}

pub async fn run(ctx: &Context, action: TicketsAction) -> Result<(), AdminError> {
    let tickets = ctx.client.tickets();

    match action {
        TicketsAction::List { list } => {
            let page = tickets.list(&list.to_query()?).await?;
            output::page(ctx.json, &page, list.page)
        }
        TicketsAction::Show { id } => output::json(&tickets.get(&TicketId::new(id)).await?),
        TicketsAction::Status { id, status } => {
            let envelope = tickets.set_status(&TicketId::new(id), status).await?;
            output::done(&envelope, &format!("Ticket status changed to {status}"));
            Ok(())
        }
        TicketsAction::Reply {
            id,
            message,
            subject,
            email,
        } => {
            let id = TicketId::new(id);
            let email = match email {
                Some(email) => email,
                None => tickets.get(&id).await?.email.ok_or_else(|| {
                    AdminError::Validation("Ticket has no email; pass --email".to_string())
                })?,
            };

            let reply = TicketReply {
                email,
                subject,
                message,
            };
            let envelope = tickets.reply(&id, &reply).await?;
            output::done(&envelope, "Reply sent");
            Ok(())
        }
    }
}
