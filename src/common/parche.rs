use serde::{Deserialize, Deserializer};

/// Campo de una actualización parcial. A diferencia de un `Option`, distingue
/// "el campo no vino en el pedido" de "vino con null" y de "vino con valor":
/// ausente deja la columna como está, null la borra, valor la reemplaza.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Parche<T> {
    #[default]
    SinCambio,
    Borrar,
    Valor(T),
}

impl<T> Parche<T> {
    pub fn es_cambio(&self) -> bool {
        !matches!(self, Parche::SinCambio)
    }
}

// Se usa junto con `#[serde(default)]`: si la clave no aparece en el JSON,
// serde toma el Default (SinCambio) y este impl nunca corre.
impl<'de, T> Deserialize<'de> for Parche<T>
where
    T: Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Option::<T>::deserialize(deserializer)? {
            Some(v) => Parche::Valor(v),
            None => Parche::Borrar,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Deserialize)]
    struct Prueba {
        #[serde(default)]
        observaciones: Parche<String>,
    }

    #[test]
    fn clave_ausente_no_cambia() {
        let p: Prueba = serde_json::from_str("{}").unwrap();
        assert_eq!(p.observaciones, Parche::SinCambio);
    }

    #[test]
    fn null_explicito_borra() {
        let p: Prueba = serde_json::from_str(r#"{"observaciones": null}"#).unwrap();
        assert_eq!(p.observaciones, Parche::Borrar);
    }

    #[test]
    fn valor_reemplaza() {
        let p: Prueba = serde_json::from_str(r#"{"observaciones": "urgente"}"#).unwrap();
        assert_eq!(p.observaciones, Parche::Valor("urgente".to_string()));
    }
}
