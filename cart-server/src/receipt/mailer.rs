//! SMTP 小票发送 (lettre + askama 模板)

use askama::Template;
use lettre::{
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
    message::{MultiPart, SinglePart, header::ContentType},
    transport::smtp::authentication::Credentials,
};

use super::{Receipt, ReceiptError, ReceiptLine};
use crate::core::Config;
use crate::utils::money;

const DATE_FORMAT: &str = "%d/%m/%Y %H:%M:%S UTC";

#[derive(Template)]
#[template(path = "email/receipt.html")]
struct ReceiptHtml<'a> {
    store_name: &'a str,
    cart_id: &'a str,
    reference: &'a str,
    method: &'a str,
    issued_at: &'a str,
    lines: &'a [ReceiptLine],
    total: &'a str,
}

#[derive(Template)]
#[template(path = "email/receipt.txt")]
struct ReceiptText<'a> {
    store_name: &'a str,
    cart_id: &'a str,
    reference: &'a str,
    method: &'a str,
    issued_at: &'a str,
    lines: &'a [ReceiptLine],
    total: &'a str,
}

/// 渲染结果
#[derive(Debug, Clone)]
pub struct RenderedReceipt {
    pub subject: String,
    pub html: String,
    pub text: String,
}

/// 渲染小票 (不涉及网络)
pub fn render(store_name: &str, receipt: &Receipt) -> Result<RenderedReceipt, ReceiptError> {
    let lines = receipt.lines();
    let total = money::format_amount(receipt.total);
    let issued_at = receipt.issued_at.format(DATE_FORMAT).to_string();

    let html = ReceiptHtml {
        store_name,
        cart_id: &receipt.cart_id,
        reference: &receipt.reference,
        method: &receipt.method,
        issued_at: &issued_at,
        lines: &lines,
        total: &total,
    }
    .render()?;
    let text = ReceiptText {
        store_name,
        cart_id: &receipt.cart_id,
        reference: &receipt.reference,
        method: &receipt.method,
        issued_at: &issued_at,
        lines: &lines,
        total: &total,
    }
    .render()?;

    Ok(RenderedReceipt {
        subject: format!("{store_name} Receipt - {}", receipt.cart_id),
        html,
        text,
    })
}

/// 小票邮件发送器
#[derive(Clone)]
pub struct ReceiptMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from_address: String,
    store_name: String,
}

impl std::fmt::Debug for ReceiptMailer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReceiptMailer")
            .field("from_address", &self.from_address)
            .field("store_name", &self.store_name)
            .finish_non_exhaustive()
    }
}

impl ReceiptMailer {
    pub fn new(
        smtp_host: &str,
        smtp_port: u16,
        username: impl Into<String>,
        password: impl Into<String>,
        store_name: impl Into<String>,
    ) -> Result<Self, ReceiptError> {
        let username = username.into();
        let credentials = Credentials::new(username.clone(), password.into());

        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(smtp_host)?
            .port(smtp_port)
            .credentials(credentials)
            .build();

        Ok(Self {
            transport,
            from_address: username,
            store_name: store_name.into(),
        })
    }

    /// 按配置创建；缺少邮箱凭据时返回 None
    pub fn from_config(config: &Config) -> Result<Option<Self>, ReceiptError> {
        match (&config.email_user, &config.email_password) {
            (Some(user), Some(password)) => Self::new(
                &config.smtp_host,
                config.smtp_port,
                user.clone(),
                password.clone(),
                config.store_name.clone(),
            )
            .map(Some),
            _ => Ok(None),
        }
    }

    pub async fn send(&self, receipt: &Receipt) -> Result<(), ReceiptError> {
        let rendered = render(&self.store_name, receipt)?;

        let email = Message::builder()
            .from(
                self.from_address
                    .parse()
                    .map_err(|_| ReceiptError::InvalidAddress(self.from_address.clone()))?,
            )
            .to(receipt
                .email
                .parse()
                .map_err(|_| ReceiptError::InvalidAddress(receipt.email.clone()))?)
            .subject(&rendered.subject)
            .multipart(
                MultiPart::alternative()
                    .singlepart(
                        SinglePart::builder()
                            .header(ContentType::TEXT_PLAIN)
                            .body(rendered.text),
                    )
                    .singlepart(
                        SinglePart::builder()
                            .header(ContentType::TEXT_HTML)
                            .body(rendered.html),
                    ),
            )?;

        self.transport.send(email).await?;
        Ok(())
    }
}
