pub mod token_codec;
pub use token_codec::TokenCodec;
pub mod auth;
pub use auth::AuthService;
pub mod pacote_ledger;
pub use pacote_ledger::PacoteLedger;
pub mod agendamento_service;
pub use agendamento_service::AgendamentoService;
pub mod venda_service;
pub use venda_service::VendaService;
pub mod empresa_service;
pub use empresa_service::EmpresaService;
