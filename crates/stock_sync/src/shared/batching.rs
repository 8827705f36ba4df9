//! Разбиение выгрузки на пакеты фиксированного размера

/// Последовательные пакеты не длиннее `size`, порядок сохраняется.
/// Нулевой размер трактуется как 1 (конфигурация такой не пропускает).
pub fn split_into_chunks<T>(items: &[T], size: usize) -> std::slice::Chunks<'_, T> {
    items.chunks(size.max(1))
}

/// Количество пакетов для `len` элементов
pub fn chunk_count(len: usize, size: usize) -> usize {
    len.div_ceil(size.max(1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chunk_sizes_and_order() {
        for len in 0..25usize {
            for size in 1..8usize {
                let items: Vec<usize> = (0..len).collect();
                let chunks: Vec<&[usize]> = split_into_chunks(&items, size).collect();

                assert_eq!(chunks.len(), chunk_count(len, size));
                assert_eq!(chunks.len(), (len + size - 1) / size);
                if let Some((last, full)) = chunks.split_last() {
                    assert!(full.iter().all(|c| c.len() == size));
                    assert!(!last.is_empty() && last.len() <= size);
                }
                assert_eq!(chunks.concat(), items);
            }
        }
    }

    #[test]
    fn test_empty_input_has_no_chunks() {
        let items: Vec<u8> = Vec::new();
        assert_eq!(split_into_chunks(&items, 100).count(), 0);
    }

    #[test]
    fn test_marketplace_sizes() {
        let items: Vec<u32> = (0..2501).collect();
        assert_eq!(split_into_chunks(&items, 2000).count(), 2);
        assert_eq!(split_into_chunks(&items, 900).count(), 3);
        assert_eq!(split_into_chunks(&items, 100).count(), 26);
    }
}
