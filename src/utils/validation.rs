use regex::Regex;

/// Mesma verificação de formato usada pelo frontend
pub fn is_valid_email(email: &str) -> bool {
    let email_regex = Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap();
    email_regex.is_match(email)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_valid_email() {
        assert!(is_valid_email("admin@cardapio.com"));
        assert!(is_valid_email("joao.silva@empresa.com.br"));
        assert!(!is_valid_email("sem-arroba"));
        assert!(!is_valid_email("dois@@arrobas.com"));
        assert!(!is_valid_email("sem@dominio"));
        assert!(!is_valid_email("com espaco@dominio.com"));
    }
}
