use crate::error::{AppError, AppResult};
use crate::models::{CreateTicketRequest, Sender, Ticket, TicketMessage, TicketStatus};
use crate::utils::generate_ticket_id;
use chrono::Utc;

/// 客服工单存储（My Tickets 页）。只管工单和留言，
/// 不含在线聊天和FAQ的渲染。
#[derive(Debug, Clone, Default)]
pub struct SupportService {
    tickets: Vec<Ticket>,
}

impl SupportService {
    pub fn new() -> Self {
        Self::default()
    }

    /// 按创建顺序返回全部工单
    pub fn tickets(&self) -> &[Ticket] {
        &self.tickets
    }

    /// 提交新工单。标题或内容为空时拒绝（表单的必填校验）。
    pub fn create_ticket(
        &mut self,
        requester_name: &str,
        request: CreateTicketRequest,
    ) -> AppResult<Ticket> {
        if request.subject.trim().is_empty() || request.message.trim().is_empty() {
            return Err(AppError::ValidationError(
                "Please fill in all required fields".to_string(),
            ));
        }
        let existing: Vec<&str> = self.tickets.iter().map(|t| t.id.as_str()).collect();
        let id = generate_ticket_id(&existing);
        let now = Utc::now();
        let ticket = Ticket {
            id: id.clone(),
            subject: request.subject,
            status: TicketStatus::Open,
            category: request.category,
            created_at: now,
            messages: vec![TicketMessage {
                id: "m1".to_string(),
                sender: Sender::User,
                name: requester_name.to_string(),
                content: request.message,
                timestamp: now,
            }],
        };
        log::info!("Ticket {id} created ({})", ticket.category);
        self.tickets.push(ticket.clone());
        Ok(ticket)
    }

    pub fn find_ticket(&self, id: &str) -> AppResult<&Ticket> {
        self.tickets
            .iter()
            .find(|t| t.id == id)
            .ok_or_else(|| AppError::NotFound(format!("Ticket {id} not found")))
    }

    /// 追加一条留言。客服回复会把 open 工单转为 pending。
    pub fn add_message(
        &mut self,
        ticket_id: &str,
        sender: Sender,
        name: &str,
        content: &str,
    ) -> AppResult<()> {
        if content.trim().is_empty() {
            return Err(AppError::ValidationError(
                "Message cannot be empty".to_string(),
            ));
        }
        let ticket = self
            .tickets
            .iter_mut()
            .find(|t| t.id == ticket_id)
            .ok_or_else(|| AppError::NotFound(format!("Ticket {ticket_id} not found")))?;
        if ticket.status == TicketStatus::Closed {
            return Err(AppError::ValidationError(format!(
                "Ticket {ticket_id} is closed"
            )));
        }
        let message_id = format!("m{}", ticket.messages.len() + 1);
        ticket.messages.push(TicketMessage {
            id: message_id,
            sender,
            name: name.to_string(),
            content: content.to_string(),
            timestamp: Utc::now(),
        });
        if sender == Sender::Support && ticket.status == TicketStatus::Open {
            ticket.status = TicketStatus::Pending;
        }
        Ok(())
    }

    pub fn close_ticket(&mut self, ticket_id: &str) -> AppResult<()> {
        let ticket = self
            .tickets
            .iter_mut()
            .find(|t| t.id == ticket_id)
            .ok_or_else(|| AppError::NotFound(format!("Ticket {ticket_id} not found")))?;
        if ticket.status == TicketStatus::Closed {
            return Err(AppError::ValidationError(format!(
                "Ticket {ticket_id} is already closed"
            )));
        }
        ticket.status = TicketStatus::Closed;
        log::info!("Ticket {ticket_id} closed");
        Ok(())
    }
}
