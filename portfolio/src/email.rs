use portfolio_config::{EmailConfig, EmailTlsConfig};
use portfolio_email_impl::{EmailServiceConfig, EmailServiceImpl, SmtpCredentials, SmtpTls};

/// Configure the SMTP transport
pub async fn connect(config: &EmailConfig) -> anyhow::Result<EmailServiceImpl> {
    EmailServiceImpl::new(service_config(config)?).await
}

fn service_config(config: &EmailConfig) -> anyhow::Result<EmailServiceConfig> {
    let credentials = match (&config.username, &config.password) {
        (Some(username), Some(password)) => Some(SmtpCredentials {
            username: username.clone(),
            password: password.clone(),
        }),
        (None, None) => None,
        _ => anyhow::bail!("email.username and email.password must be set together"),
    };

    Ok(EmailServiceConfig {
        host: config.host.clone(),
        port: config.port,
        tls: match config.tls {
            EmailTlsConfig::None => SmtpTls::None,
            EmailTlsConfig::Starttls => SmtpTls::StartTls,
            EmailTlsConfig::Tls => SmtpTls::Tls,
        },
        credentials,
        timeout: config.timeout.into(),
        from: config.from.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn email_config(username: Option<&str>, password: Option<&str>) -> EmailConfig {
        EmailConfig {
            host: "smtp.example.com".into(),
            port: 587,
            tls: EmailTlsConfig::Starttls,
            username: username.map(Into::into),
            password: password.map(|x| x.to_owned().into()),
            timeout: portfolio_config::Duration(std::time::Duration::from_secs(5)),
            from: "Portfolio <noreply@example.com>".parse().unwrap(),
        }
    }

    #[test]
    fn with_credentials() {
        let config = service_config(&email_config(Some("relay"), Some("hunter2"))).unwrap();

        assert_eq!(config.tls, SmtpTls::StartTls);
        let credentials = config.credentials.unwrap();
        assert_eq!(credentials.username, "relay");
        assert_eq!(*credentials.password, "hunter2");
    }

    #[test]
    fn without_credentials() {
        let config = service_config(&email_config(None, None)).unwrap();
        assert!(config.credentials.is_none());
    }

    #[test]
    fn incomplete_credentials() {
        assert!(service_config(&email_config(Some("relay"), None)).is_err());
        assert!(service_config(&email_config(None, Some("hunter2"))).is_err());
    }
}
