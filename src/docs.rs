// src/docs.rs

use utoipa::OpenApi;
use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Health ---
        handlers::health::health,

        // --- Auth ---
        handlers::auth::login,
        handlers::auth::me,

        // --- Clientes & Pets ---
        handlers::clientes::listar,
        handlers::clientes::criar,
        handlers::clientes::buscar,
        handlers::clientes::atualizar,
        handlers::clientes::desativar,
        handlers::clientes::listar_pets,
        handlers::clientes::criar_pet,

        // --- Catálogo ---
        handlers::catalogo::listar_produtos,
        handlers::catalogo::listar_servicos,

        // --- Agendamentos ---
        handlers::agendamentos::criar,
        handlers::agendamentos::listar,
        handlers::agendamentos::hoje,
        handlers::agendamentos::calendario,
        handlers::agendamentos::mudar_status,

        // --- Pacotes ---
        handlers::pacotes::listar,
        handlers::pacotes::criar,
        handlers::pacotes::buscar,
        handlers::pacotes::atualizar,
        handlers::pacotes::desativar,
        handlers::pacotes::vender,
        handlers::pacotes::pacotes_do_cliente,

        // --- Vendas ---
        handlers::vendas::registrar,
        handlers::vendas::listar,
        handlers::vendas::buscar,

        // --- Empresas ---
        handlers::empresas::minha,
        handlers::empresas::atualizar_minha,
        handlers::empresas::listar,
        handlers::empresas::criar,
        handlers::empresas::registrar_banco,
    ),
    components(
        schemas(
            // --- Auth ---
            models::auth::Funcionario,
            models::auth::LoginPayload,
            models::auth::RespostaLogin,
            models::auth::CurrentUser,

            // --- Clientes & Pets ---
            models::cliente::Cliente,
            models::cliente::Pet,
            models::cliente::CriarClientePayload,
            models::cliente::AtualizarClientePayload,
            models::cliente::CriarPetPayload,

            // --- Catálogo ---
            models::catalogo::Produto,
            models::catalogo::Servico,

            // --- Agendamentos ---
            models::agendamento::Agendamento,
            models::agendamento::AgendamentoDetalhado,
            models::agendamento::ContagemDia,
            models::agendamento::CriarAgendamentoPayload,
            models::agendamento::AtualizarStatusPayload,

            // --- Pacotes ---
            models::pacote::Pacote,
            models::pacote::PacoteDetalhado,
            models::pacote::ClientePacote,
            models::pacote::ClientePacoteResumo,
            models::pacote::CriarPacotePayload,
            models::pacote::AtualizarPacotePayload,
            models::pacote::VenderPacotePayload,

            // --- Vendas ---
            models::venda::Venda,
            models::venda::VendaItem,
            models::venda::VendaDetalhada,
            models::venda::ItemVendaPayload,
            models::venda::CriarVendaPayload,

            // --- Empresas ---
            models::empresa::Empresa,
            models::empresa::CriarEmpresaPayload,
            models::empresa::AtualizarEmpresaPayload,
            models::empresa::RegistrarBancoPayload,
        )
    ),
    tags(
        (name = "Health", description = "Verificação de saúde do serviço"),
        (name = "Auth", description = "Autenticação de funcionários"),
        (name = "Clientes", description = "Cadastro de tutores e seus pets"),
        (name = "Catálogo", description = "Produtos e serviços da empresa"),
        (name = "Agendamentos", description = "Agenda de serviços"),
        (name = "Pacotes", description = "Pacotes de créditos e combos"),
        (name = "Vendas", description = "Registro de vendas de balcão"),
        (name = "Empresas", description = "Gestão de empresas (tenants)")
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "api_jwt",
            SecurityScheme::Http(
                Http::new(HttpAuthScheme::Bearer)
            ),
        );
    }
}
