// src/common/merge.rs

// Regras de mesclagem das atualizações parciais: um campo só é sobrescrito
// quando foi realmente informado E não é vazio (texto) nem zero (números).
// Consequência conhecida: não é possível zerar um número nem limpar um texto
// por atualização. Toda atualização parcial do sistema passa por aqui.

use rust_decimal::Decimal;

pub fn merge_text(field: &mut String, value: Option<&str>) {
    if let Some(v) = value {
        if !v.is_empty() {
            *field = v.to_string();
        }
    }
}

pub fn merge_optional_text(field: &mut Option<String>, value: Option<&str>) {
    if let Some(v) = value {
        if !v.is_empty() {
            *field = Some(v.to_string());
        }
    }
}

pub fn merge_nonzero_int(field: &mut i32, value: Option<i32>) {
    if let Some(v) = value {
        if v != 0 {
            *field = v;
        }
    }
}

pub fn merge_nonzero_decimal(field: &mut Decimal, value: Option<Decimal>) {
    if let Some(v) = value {
        if !v.is_zero() {
            *field = v;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    #[test]
    fn texto_ausente_ou_vazio_nao_sobrescreve() {
        let mut field = "Sucre".to_string();
        merge_text(&mut field, None);
        assert_eq!(field, "Sucre");
        merge_text(&mut field, Some(""));
        assert_eq!(field, "Sucre");
        merge_text(&mut field, Some("Farine"));
        assert_eq!(field, "Farine");
    }

    #[test]
    fn texto_opcional_preserva_valor_anterior() {
        let mut field = Some("descrição antiga".to_string());
        merge_optional_text(&mut field, Some(""));
        assert_eq!(field.as_deref(), Some("descrição antiga"));
        merge_optional_text(&mut field, Some("nova"));
        assert_eq!(field.as_deref(), Some("nova"));

        let mut empty: Option<String> = None;
        merge_optional_text(&mut empty, None);
        assert_eq!(empty, None);
    }

    #[test]
    fn zero_e_tratado_como_ausente() {
        let mut qty = 10;
        merge_nonzero_int(&mut qty, Some(0));
        assert_eq!(qty, 10);
        merge_nonzero_int(&mut qty, None);
        assert_eq!(qty, 10);
        merge_nonzero_int(&mut qty, Some(7));
        assert_eq!(qty, 7);

        let mut price = Decimal::new(1250, 2);
        merge_nonzero_decimal(&mut price, Some(Decimal::ZERO));
        assert_eq!(price, Decimal::new(1250, 2));
        merge_nonzero_decimal(&mut price, Some(Decimal::new(999, 2)));
        assert_eq!(price, Decimal::new(999, 2));
    }
}
