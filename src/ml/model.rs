use burn::{
    nn::{
        conv::{Conv2d, Conv2dConfig, ConvTranspose2d, ConvTranspose2dConfig},
        pool::{MaxPool2d, MaxPool2dConfig},
        PaddingConfig2d,
    },
    prelude::*,
    tensor::activation::relu,
};

/// Channel widths of the three stages plus the RGB output count.
/// The topology is fully convolutional, so no input size appears here;
/// whatever tile size goes in, twice that size comes out.
#[derive(Config, Debug)]
pub struct EnlargeNetConfig {
    #[config(default = 3)]
    pub channels: usize,
    #[config(default = 64)]
    pub n1: usize,
    #[config(default = 128)]
    pub n2: usize,
    #[config(default = 256)]
    pub n3: usize,
}

impl EnlargeNetConfig {
    pub fn init<B: Backend>(&self, device: &B::Device) -> EnlargeNet<B> {
        EnlargeNet {
            enc1_a: conv3(self.channels, self.n1, device),
            enc1_b: conv3(self.n1, self.n1, device),
            skip_up: upsample(self.n1, self.n1, device),
            enc2_a: conv3(self.n1, self.n2, device),
            enc2_b: conv3(self.n2, self.n2, device),
            pool: MaxPool2dConfig::new([2, 2]).with_strides([2, 2]).init(),
            bottleneck: conv3(self.n2, self.n3, device),
            up2: upsample(self.n3, self.n3, device),
            dec2_a: conv3(self.n3, self.n2, device),
            dec2_b: conv3(self.n2, self.n2, device),
            up1: upsample(self.n2, self.n1, device),
            dec1_a: conv3(self.n1, self.n1, device),
            dec1_b: conv3(self.n1, self.n1, device),
            // Linear output head — no activation, 5x5 window
            output: Conv2dConfig::new([self.n1, self.channels], [5, 5])
                .with_padding(PaddingConfig2d::Same)
                .init(device),
        }
    }
}

/// 3x3 same-padding convolution.
fn conv3<B: Backend>(ch_in: usize, ch_out: usize, device: &B::Device) -> Conv2d<B> {
    Conv2dConfig::new([ch_in, ch_out], [3, 3])
        .with_padding(PaddingConfig2d::Same)
        .init(device)
}

/// Stride-2 transposed convolution that exactly doubles the
/// spatial size: out = (in-1)*2 - 2*1 + 3 + 1 = 2*in.
fn upsample<B: Backend>(ch_in: usize, ch_out: usize, device: &B::Device) -> ConvTranspose2d<B> {
    ConvTranspose2dConfig::new([ch_in, ch_out], [3, 3])
        .with_stride([2, 2])
        .with_padding([1, 1])
        .with_padding_out([1, 1])
        .init(device)
}

/// The enlarger network.
///
/// Encoder stage 1 runs at seed resolution and its output is lifted to
/// output resolution once (`skip_up`) to feed the outer skip join.
/// Stage 2 is the only pooled stage; the bottleneck sits below it.
/// The decoder mirrors the encoder with two additive skip connections
/// at matching resolutions.
#[derive(Module, Debug)]
pub struct EnlargeNet<B: Backend> {
    pub enc1_a: Conv2d<B>,
    pub enc1_b: Conv2d<B>,
    pub skip_up: ConvTranspose2d<B>,
    pub enc2_a: Conv2d<B>,
    pub enc2_b: Conv2d<B>,
    pub pool: MaxPool2d,
    pub bottleneck: Conv2d<B>,
    pub up2: ConvTranspose2d<B>,
    pub dec2_a: Conv2d<B>,
    pub dec2_b: Conv2d<B>,
    pub up1: ConvTranspose2d<B>,
    pub dec1_a: Conv2d<B>,
    pub dec1_b: Conv2d<B>,
    pub output: Conv2d<B>,
}

impl<B: Backend> EnlargeNet<B> {
    /// seeds: [batch, 3, s, s] → reconstruction: [batch, 3, 2s, 2s]
    pub fn forward(&self, x: Tensor<B, 4>) -> Tensor<B, 4> {
        // Encoder stage 1 (seed resolution)
        let c1 = relu(self.enc1_a.forward(x));
        let c1 = relu(self.enc1_b.forward(c1));
        // Lift stage 1 to output resolution for the outer skip
        let c1_up = relu(self.skip_up.forward(c1.clone()));

        // Encoder stage 2, then the single pooled downsample
        let c2 = relu(self.enc2_a.forward(c1));
        let c2 = relu(self.enc2_b.forward(c2));
        let x = self.pool.forward(c2.clone());

        // Bottleneck, then back up to seed resolution
        let c3 = relu(self.bottleneck.forward(x));
        let x = relu(self.up2.forward(c3));

        // Decoder stage 2 + inner additive skip
        let d2 = relu(self.dec2_a.forward(x));
        let d2 = relu(self.dec2_b.forward(d2));
        let m1 = c2 + d2;

        // Up to output resolution, decoder stage 1 + outer skip
        let m1 = relu(self.up1.forward(m1));
        let d1 = relu(self.dec1_a.forward(m1));
        let d1 = relu(self.dec1_b.forward(d1));
        let m2 = c1_up + d1;

        self.output.forward(m2)
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::ml::InferBackend;

    #[test]
    fn test_forward_doubles_spatial_size() {
        let device = Default::default();
        let net = EnlargeNetConfig::new().init::<InferBackend>(&device);
        let seed = Tensor::<InferBackend, 4>::zeros([1, 3, 8, 8], &device);
        let out = net.forward(seed);
        assert_eq!(out.dims(), [1, 3, 16, 16]);
    }

    #[test]
    fn test_forward_keeps_batch_and_channels() {
        let device = Default::default();
        let net = EnlargeNetConfig::new().init::<InferBackend>(&device);
        let seed = Tensor::<InferBackend, 4>::zeros([2, 3, 4, 4], &device);
        let out = net.forward(seed);
        assert_eq!(out.dims(), [2, 3, 8, 8]);
    }
}
