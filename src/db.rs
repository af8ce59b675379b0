pub mod router;
pub use router::DatabaseRouter;
pub mod funcionario_repo;
pub use funcionario_repo::FuncionarioRepository;
pub mod cliente_repo;
pub use cliente_repo::ClienteRepository;
pub mod catalogo_repo;
pub use catalogo_repo::CatalogoRepository;
pub mod pacote_repo;
pub use pacote_repo::PacoteRepository;
pub mod agendamento_repo;
pub use agendamento_repo::AgendamentoRepository;
pub mod venda_repo;
pub use venda_repo::VendaRepository;
pub mod empresa_repo;
pub use empresa_repo::EmpresaRepository;
