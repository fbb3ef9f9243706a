use chrono::Utc;
use rand::Rng;

/// Gera o número legível do pedido: PED + 6 dígitos finais do timestamp em
/// milissegundos + 3 dígitos aleatórios. A unicidade real fica a cargo do
/// índice único de pedidos.numero_pedido.
pub fn gerar_numero_pedido() -> String {
    let timestamp = Utc::now().timestamp_millis().to_string();
    let sufixo = &timestamp[timestamp.len().saturating_sub(6)..];

    let mut rng = rand::thread_rng();
    format!("PED{}{:03}", sufixo, rng.gen_range(0..1000))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_formato_do_numero() {
        let numero = gerar_numero_pedido();
        assert!(numero.starts_with("PED"));
        assert_eq!(numero.len(), 12);
        assert!(numero[3..].chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn test_numeros_consecutivos_diferem() {
        // Os 3 dígitos aleatórios tornam colisões raríssimas dentro do mesmo
        // milissegundo; aqui só garantimos que a função não trava nem repete
        // sempre o mesmo valor.
        let numeros: Vec<String> = (0..20).map(|_| gerar_numero_pedido()).collect();
        let distintos: std::collections::HashSet<&String> = numeros.iter().collect();
        assert!(distintos.len() > 1);
    }
}
