use sqlx::{Postgres, QueryBuilder};

// ---
// Helper de UPDATE parcial
// ---
// Monta um UPDATE apenas com as colunas efetivamente enviadas pelo cliente,
// sempre com placeholders ($1, $2, ...) — nunca concatenação de valores.
pub struct UpdateParcial<'args> {
    builder: QueryBuilder<'args, Postgres>,
    tem_campos: bool,
}

impl<'args> UpdateParcial<'args> {
    /// Começa um `UPDATE <tabela> SET` vazio. As colunas vêm de `campo`.
    pub fn new(tabela: &str) -> Self {
        let builder = QueryBuilder::new(format!("UPDATE {tabela} SET "));
        Self { builder, tem_campos: false }
    }

    /// Adiciona `coluna = $n` quando o valor está presente; `None` é ignorado.
    /// `coluna` é sempre um literal do nosso código, nunca entrada do cliente.
    pub fn campo<T>(&mut self, coluna: &str, valor: Option<T>) -> &mut Self
    where
        T: 'args + sqlx::Encode<'args, Postgres> + sqlx::Type<Postgres> + Send,
    {
        if let Some(v) = valor {
            if self.tem_campos {
                self.builder.push(", ");
            }
            self.builder.push(coluna);
            self.builder.push(" = ");
            self.builder.push_bind(v);
            self.tem_campos = true;
        }
        self
    }

    /// Nenhum campo foi enviado? O chamador decide se isso é erro ou no-op.
    pub fn vazia(&self) -> bool {
        !self.tem_campos
    }

    /// Fecha com `WHERE id = $n` e devolve o builder pronto para `build()`.
    pub fn com_id(mut self, id: i64) -> QueryBuilder<'args, Postgres> {
        self.builder.push(" WHERE id = ");
        self.builder.push_bind(id);
        self.builder
    }

    #[cfg(test)]
    fn sql(&self) -> &str {
        self.builder.sql()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn monta_update_somente_com_campos_presentes() {
        let mut up = UpdateParcial::new("clientes");
        up.campo("nome", Some("Maria".to_string()))
            .campo("telefone", Option::<String>::None)
            .campo("email", Some("maria@exemplo.com".to_string()));

        assert!(!up.vazia());
        let builder = up.com_id(7);
        assert_eq!(
            builder.sql(),
            "UPDATE clientes SET nome = $1, email = $2 WHERE id = $3"
        );
    }

    #[test]
    fn sem_campos_fica_vazia() {
        let mut up = UpdateParcial::new("empresas");
        up.campo("nome", Option::<String>::None);
        assert!(up.vazia());
        assert_eq!(up.sql(), "UPDATE empresas SET ");
    }

    #[test]
    fn valores_nunca_entram_no_sql() {
        let mut up = UpdateParcial::new("pets");
        up.campo("nome", Some("Rex'; DROP TABLE pets;--".to_string()));
        assert_eq!(up.sql(), "UPDATE pets SET nome = $1");
    }
}
