use std::cmp::Ordering;

/// Compara números de renglón guardados como texto tratándolos como enteros,
/// igual que el `CAST(renglon AS INTEGER)` de las consultas: "10" va después
/// de "9", no entre "1" y "2". Los valores no numéricos quedan al final, en
/// orden alfabético.
pub fn cmp_renglon(a: &str, b: &str) -> Ordering {
    match (a.trim().parse::<i64>(), b.trim().parse::<i64>()) {
        (Ok(x), Ok(y)) => x.cmp(&y),
        (Ok(_), Err(_)) => Ordering::Less,
        (Err(_), Ok(_)) => Ordering::Greater,
        (Err(_), Err(_)) => a.cmp(b),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordena_numericamente_no_lexicograficamente() {
        let mut renglones = vec!["2", "10", "1"];
        renglones.sort_by(|a, b| cmp_renglon(a, b));
        assert_eq!(renglones, vec!["1", "2", "10"]);
    }

    #[test]
    fn no_numericos_al_final() {
        let mut renglones = vec!["B", "3", "A", "12"];
        renglones.sort_by(|a, b| cmp_renglon(a, b));
        assert_eq!(renglones, vec!["3", "12", "A", "B"]);
    }

    #[test]
    fn iguales() {
        assert_eq!(cmp_renglon("07", "7"), Ordering::Equal);
    }
}
