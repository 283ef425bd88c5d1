use cpal::traits::{DeviceTrait, StreamTrait};
use cpal::{Device, SampleRate, Stream, StreamConfig};
use tokio::sync::mpsc;
use voxplug_core::{AudioChunk, AudioError};

// ── BlockAssembler ────────────────────────────────────────────

/// Accumulates raw callback data into fixed-size blocks and sends each
/// completed block as one immutable [`AudioChunk`] over the chunk channel.
pub struct BlockAssembler {
    pending: Vec<i16>,
    block_len: usize,
    sample_rate: u32,
    channels: u16,
    chunk_tx: mpsc::UnboundedSender<AudioChunk>,
}

impl BlockAssembler {
    pub fn new(
        chunk_tx: mpsc::UnboundedSender<AudioChunk>,
        sample_rate: u32,
        channels: u16,
        block_size: u32,
    ) -> Self {
        let block_len = block_size as usize * channels as usize;
        Self {
            pending: Vec::with_capacity(block_len),
            block_len,
            sample_rate,
            channels,
            chunk_tx,
        }
    }

    /// Append captured samples; emits one chunk per completed block.
    pub fn push(&mut self, data: &[i16]) {
        self.pending.extend_from_slice(data);
        while self.pending.len() >= self.block_len {
            let rest = self.pending.split_off(self.block_len);
            let samples = std::mem::replace(&mut self.pending, rest);
            let chunk = AudioChunk {
                samples,
                sample_rate: self.sample_rate,
                channels: self.channels,
            };
            // Receiver dropped means shutdown is underway
            let _ = self.chunk_tx.send(chunk);
        }
    }

    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }
}

// ── CaptureNode ───────────────────────────────────────────────

pub struct CaptureNode {
    _stream: Stream,
}

impl CaptureNode {
    pub fn new(
        device: &Device,
        chunk_tx: mpsc::UnboundedSender<AudioChunk>,
        sample_rate: u32,
        channels: u16,
        block_size: u32,
    ) -> Result<Self, AudioError> {
        let config = StreamConfig {
            channels,
            sample_rate: SampleRate(sample_rate),
            buffer_size: cpal::BufferSize::Default,
        };

        let mut assembler = BlockAssembler::new(chunk_tx, sample_rate, channels, block_size);

        let err_callback = |err: cpal::StreamError| {
            tracing::error!("capture stream error: {}", err);
        };

        let stream = device
            .build_input_stream(
                &config,
                move |data: &[i16], _: &cpal::InputCallbackInfo| {
                    assembler.push(data);
                },
                err_callback,
                None,
            )
            .map_err(|e| AudioError::StreamBuild(e.to_string()))?;

        stream
            .play()
            .map_err(|e| AudioError::StreamStart(e.to_string()))?;

        Ok(Self { _stream: stream })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_assembler(
        block_size: u32,
    ) -> (BlockAssembler, mpsc::UnboundedReceiver<AudioChunk>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (BlockAssembler::new(tx, 16000, 1, block_size), rx)
    }

    #[test]
    fn test_assembler_emits_nothing_below_block_size() {
        let (mut assembler, mut rx) = make_assembler(8);
        assembler.push(&[1, 2, 3]);
        assert!(rx.try_recv().is_err());
        assert_eq!(assembler.pending_len(), 3);
    }

    #[test]
    fn test_assembler_emits_exact_block() {
        let (mut assembler, mut rx) = make_assembler(4);
        assembler.push(&[1, 2, 3, 4]);
        let chunk = rx.try_recv().unwrap();
        assert_eq!(chunk.samples, vec![1, 2, 3, 4]);
        assert_eq!(chunk.sample_rate, 16000);
        assert_eq!(chunk.channels, 1);
        assert_eq!(assembler.pending_len(), 0);
    }

    #[test]
    fn test_assembler_carries_remainder() {
        let (mut assembler, mut rx) = make_assembler(4);
        assembler.push(&[1, 2, 3, 4, 5, 6]);
        let chunk = rx.try_recv().unwrap();
        assert_eq!(chunk.samples, vec![1, 2, 3, 4]);
        assert!(rx.try_recv().is_err());
        assert_eq!(assembler.pending_len(), 2);

        assembler.push(&[7, 8]);
        let chunk = rx.try_recv().unwrap();
        assert_eq!(chunk.samples, vec![5, 6, 7, 8]);
    }

    #[test]
    fn test_assembler_emits_multiple_blocks_per_push() {
        let (mut assembler, mut rx) = make_assembler(2);
        assembler.push(&[1, 2, 3, 4, 5, 6]);
        assert_eq!(rx.try_recv().unwrap().samples, vec![1, 2]);
        assert_eq!(rx.try_recv().unwrap().samples, vec![3, 4]);
        assert_eq!(rx.try_recv().unwrap().samples, vec![5, 6]);
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_assembler_preserves_order() {
        let (mut assembler, mut rx) = make_assembler(4);
        let signal: Vec<i16> = (0..16).collect();
        assembler.push(&signal);

        let mut reassembled = Vec::new();
        while let Ok(chunk) = rx.try_recv() {
            reassembled.extend(chunk.samples);
        }
        assert_eq!(reassembled, signal);
    }

    #[test]
    fn test_assembler_block_len_scales_with_channels() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut assembler = BlockAssembler::new(tx, 16000, 2, 4);
        // 4 frames of 2 channels = 8 samples per block
        assembler.push(&[0; 7]);
        assert!(rx.try_recv().is_err());
        assembler.push(&[0; 1]);
        let chunk = rx.try_recv().unwrap();
        assert_eq!(chunk.samples.len(), 8);
        assert_eq!(chunk.channels, 2);
    }

    #[test]
    fn test_assembler_dropped_receiver_does_not_panic() {
        let (tx, rx) = mpsc::unbounded_channel();
        drop(rx);
        let mut assembler = BlockAssembler::new(tx, 16000, 1, 2);
        assembler.push(&[1, 2, 3, 4]);
    }
}
