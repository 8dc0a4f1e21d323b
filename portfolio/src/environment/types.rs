use portfolio_core_contact_impl::ContactFeatureServiceImpl;
use portfolio_core_health_impl::HealthFeatureServiceImpl;
use portfolio_email_impl::EmailServiceImpl;

// API
pub type RestServer = portfolio_api_rest::RestServer<HealthFeature, ContactFeature>;

// Email
pub type Email = EmailServiceImpl;

// Core
pub type HealthFeature = HealthFeatureServiceImpl<Email>;
pub type ContactFeature = ContactFeatureServiceImpl<Email>;
