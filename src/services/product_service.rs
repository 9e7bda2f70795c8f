// src/services/product_service.rs

use rust_decimal::Decimal;
use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    common::merge::{merge_nonzero_decimal, merge_nonzero_int, merge_optional_text, merge_text},
    db::{MovementRepository, ProductRepository},
    models::movement::{MovementType, StockMovement},
    models::product::Product,
};

/// Campos aceitos numa atualização parcial de produto. As referências
/// (categoria, fornecedor, unidade, estoque) não são alteráveis por aqui,
/// e a quantidade total é derivada, nunca aceita do chamador.
#[derive(Debug, Default, Clone)]
pub struct ProductUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub product_type: Option<String>,
    pub purchase_price: Option<Decimal>,
    pub quantity_in_stock: Option<i32>,
    pub min_quantity: Option<i32>,
}

fn apply_update(product: &mut Product, input: &ProductUpdate) {
    merge_text(&mut product.name, input.name.as_deref());
    merge_optional_text(&mut product.description, input.description.as_deref());
    merge_optional_text(&mut product.product_type, input.product_type.as_deref());
    merge_nonzero_decimal(&mut product.purchase_price, input.purchase_price);
    merge_nonzero_int(&mut product.quantity_in_stock, input.quantity_in_stock);
    merge_nonzero_int(&mut product.min_quantity, input.min_quantity);
}

fn sum_quantities(products: &[Product]) -> i32 {
    products.iter().map(|p| p.quantity_in_stock).sum()
}

#[derive(Clone)]
pub struct ProductService {
    product_repo: ProductRepository,
    movement_repo: MovementRepository,
    pool: PgPool,
}

impl ProductService {
    pub fn new(
        product_repo: ProductRepository,
        movement_repo: MovementRepository,
        pool: PgPool,
    ) -> Self {
        Self {
            product_repo,
            movement_repo,
            pool,
        }
    }

    // ---
    // Listagens
    // ---

    /// Com id: o produto pedido. Sem id: um representante por nome, em ordem
    /// alfabética. Coleção vazia é erro, não lista vazia.
    pub async fn get_products(&self, id: Option<Uuid>) -> Result<Vec<Product>, AppError> {
        if let Some(id) = id {
            let product = self
                .product_repo
                .find_by_id(&self.pool, id)
                .await?
                .ok_or_else(|| AppError::NotFound(format!("Nenhum produto com o id {} existe", id)))?;
            return Ok(vec![product]);
        }

        let products = self.product_repo.find_all_distinct().await?;
        if products.is_empty() {
            return Err(AppError::NotFound("Nenhum produto encontrado".to_string()));
        }
        Ok(products)
    }

    /// Todas as variantes de um mesmo nome (uma por estoque).
    pub async fn get_products_by_name(&self, name: &str) -> Result<Vec<Product>, AppError> {
        let products = self.product_repo.find_all_by_name(&self.pool, name).await?;
        if products.is_empty() {
            return Err(AppError::NotFound("Nenhum produto encontrado".to_string()));
        }
        Ok(products)
    }

    pub async fn get_movements(&self, product_id: Uuid) -> Result<Vec<StockMovement>, AppError> {
        self.product_repo
            .find_by_id(&self.pool, product_id)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!("Nenhum produto com o id {} existe", product_id))
            })?;

        self.movement_repo.find_by_product(product_id).await
    }

    // ---
    // Quantidade total derivada
    // ---

    /// Recalcula a quantidade total do grupo de mesmo nome e grava em todos
    /// os registros. Falha se o nome não existir.
    pub async fn refresh_total_quantity(&self, name: &str) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await?;

        let refreshed = self.refresh_group(&mut tx, name).await?;
        if refreshed == 0 {
            return Err(AppError::NotFound(format!(
                "Nenhum produto com o nome {} encontrado.",
                name
            )));
        }

        tx.commit().await?;
        Ok(())
    }

    /// Versão interna, para compor dentro de uma transação já aberta.
    /// Bloqueia o grupo (`FOR UPDATE`), soma e grava. Grupo vazio é
    /// silenciosamente ignorado (caso do último registro recém-removido).
    /// Retorna o tamanho do grupo.
    pub(crate) async fn refresh_group(
        &self,
        conn: &mut PgConnection,
        name: &str,
    ) -> Result<usize, AppError> {
        let products = self
            .product_repo
            .find_all_by_name_for_update(&mut *conn, name)
            .await?;
        if products.is_empty() {
            return Ok(0);
        }

        let total = sum_quantities(&products);
        self.product_repo
            .set_total_quantity(&mut *conn, name, total)
            .await?;

        Ok(products.len())
    }

    // ---
    // Mutação
    // ---

    #[allow(clippy::too_many_arguments)]
    pub async fn create_product(
        &self,
        name: &str,
        description: Option<&str>,
        product_type: Option<&str>,
        purchase_price: Decimal,
        quantity_in_stock: i32,
        min_quantity: i32,
        category_id: Uuid,
        supplier_id: Option<Uuid>,
        unit_id: Uuid,
        stock_id: Uuid,
    ) -> Result<Product, AppError> {
        let mut tx = self.pool.begin().await?;

        if self.product_repo.name_taken(&mut *tx, name, None).await? {
            return Err(AppError::Conflict(format!(
                "Um produto com o nome {} já existe.",
                name
            )));
        }

        let product = self
            .product_repo
            .insert(
                &mut *tx,
                name,
                description,
                product_type,
                purchase_price,
                quantity_in_stock,
                min_quantity,
                category_id,
                supplier_id,
                unit_id,
                stock_id,
            )
            .await?;

        // Saldo inicial entra no histórico.
        if quantity_in_stock > 0 {
            self.movement_repo
                .insert(
                    &mut *tx,
                    product.id,
                    stock_id,
                    MovementType::Entry,
                    quantity_in_stock,
                    Some("Criação de produto"),
                )
                .await?;
        }

        self.refresh_group(&mut tx, name).await?;

        let product = self
            .product_repo
            .find_by_id(&mut *tx, product.id)
            .await?
            .ok_or_else(|| AppError::InternalServerError(anyhow::anyhow!("produto recém-criado ausente")))?;

        tx.commit().await?;
        Ok(product)
    }

    pub async fn update_product(&self, id: Uuid, input: &ProductUpdate) -> Result<Product, AppError> {
        let mut tx = self.pool.begin().await?;

        let mut product = self
            .product_repo
            .find_by_id_for_update(&mut *tx, id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Nenhum produto com o id {} existe", id)))?;

        let old_name = product.name.clone();

        // Conflito só quando o nome informado pertence a OUTRO registro;
        // reenviar o próprio nome nunca conflita.
        if let Some(new_name) = input.name.as_deref() {
            if !new_name.is_empty()
                && new_name != old_name
                && self
                    .product_repo
                    .name_taken(&mut *tx, new_name, Some(id))
                    .await?
            {
                return Err(AppError::Conflict(format!(
                    "Um produto com o nome {} já existe.",
                    new_name
                )));
            }
        }

        apply_update(&mut product, input);
        self.product_repo.update(&mut *tx, &product).await?;

        self.refresh_group(&mut tx, &product.name).await?;
        if product.name != old_name {
            // O grupo antigo também precisa de recomputação após a renomeação.
            self.refresh_group(&mut tx, &old_name).await?;
        }

        let product = self
            .product_repo
            .find_by_id(&mut *tx, id)
            .await?
            .ok_or_else(|| AppError::InternalServerError(anyhow::anyhow!("produto atualizado ausente")))?;

        tx.commit().await?;
        Ok(product)
    }

    pub async fn delete_product(&self, id: Uuid) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await?;
        self.delete_in_tx(&mut tx, id).await?;
        tx.commit().await?;
        Ok(())
    }

    /// Remove o produto e suas movimentações, depois recalcula o total dos
    /// irmãos de mesmo nome que restarem. Composta pela cascata de estoque.
    pub(crate) async fn delete_in_tx(
        &self,
        conn: &mut PgConnection,
        id: Uuid,
    ) -> Result<(), AppError> {
        let product = self
            .product_repo
            .find_by_id_for_update(&mut *conn, id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Nenhum produto com o id {} existe", id)))?;

        self.movement_repo.delete_by_product(&mut *conn, id).await?;
        self.product_repo.delete(&mut *conn, id).await?;

        self.refresh_group(&mut *conn, &product.name).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn product(name: &str, quantity: i32) -> Product {
        Product {
            id: Uuid::new_v4(),
            name: name.to_string(),
            description: Some("granulado".to_string()),
            product_type: Some("alimento".to_string()),
            purchase_price: Decimal::new(450, 2),
            quantity_in_stock: quantity,
            total_quantity: 0,
            min_quantity: 2,
            category_id: Uuid::new_v4(),
            supplier_id: None,
            unit_id: Uuid::new_v4(),
            stock_id: Uuid::new_v4(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn soma_do_grupo_cobre_todos_os_estoques() {
        let group = vec![product("Sucre", 10), product("Sucre", 5)];
        assert_eq!(sum_quantities(&group), 15);
    }

    #[test]
    fn soma_apos_remocao_de_um_estoque() {
        let group = vec![product("Sucre", 5)];
        assert_eq!(sum_quantities(&group), 5);
    }

    #[test]
    fn soma_de_grupo_vazio_e_zero() {
        assert_eq!(sum_quantities(&[]), 0);
    }

    #[test]
    fn atualizacao_parcial_ignora_vazios_e_zeros() {
        let mut p = product("Sucre", 10);
        let input = ProductUpdate {
            name: Some(String::new()),
            description: None,
            product_type: Some(String::new()),
            purchase_price: Some(Decimal::ZERO),
            quantity_in_stock: Some(0),
            min_quantity: None,
        };
        apply_update(&mut p, &input);

        assert_eq!(p.name, "Sucre");
        assert_eq!(p.description.as_deref(), Some("granulado"));
        assert_eq!(p.product_type.as_deref(), Some("alimento"));
        assert_eq!(p.purchase_price, Decimal::new(450, 2));
        assert_eq!(p.quantity_in_stock, 10);
        assert_eq!(p.min_quantity, 2);
    }

    #[test]
    fn atualizacao_parcial_aplica_campos_informados() {
        let mut p = product("Sucre", 10);
        let input = ProductUpdate {
            name: Some("Farine".to_string()),
            description: Some("tipo 55".to_string()),
            product_type: None,
            purchase_price: Some(Decimal::new(300, 2)),
            quantity_in_stock: Some(25),
            min_quantity: Some(4),
        };
        apply_update(&mut p, &input);

        assert_eq!(p.name, "Farine");
        assert_eq!(p.description.as_deref(), Some("tipo 55"));
        assert_eq!(p.product_type.as_deref(), Some("alimento"));
        assert_eq!(p.purchase_price, Decimal::new(300, 2));
        assert_eq!(p.quantity_in_stock, 25);
        assert_eq!(p.min_quantity, 4);
    }
}
